// ==========================================
// 智慧朝觐运维平台 - 维护决策 API
// ==========================================
// 职责: 请求校验 -> 调用引擎 -> 组装响应; 记录调用与拒收日志
// 红线: 引擎本身不记日志,所有日志在本层输出
// ==========================================

use std::path::Path;

use tracing::instrument;

use crate::api::dto::{
    AssessRequest, AssessmentResponse, CostRequest, DurationRequest, DurationResponse,
    HealthRequest, PlanWorkOrderRequest, PlanWorkOrderResponse, PriorityRequest,
    PriorityResponse, ScheduleRequest, ScheduleResponse, SensorAlert,
};
use crate::api::error::{ApiError, ApiResult};
use crate::config::{ConfigManager, EngineConfig};
use crate::domain::{
    InfrastructureAsset, MaintenancePrediction, MaintenanceWorkOrder, SensorStatus,
};
use crate::engine::{CostBreakdown, HealthBreakdown, MaintenanceEngines};
use crate::importer::{ImportReport, SensorReadingImporter};

// ==========================================
// MaintenanceApi - 维护决策 API
// ==========================================

/// 维护决策API
///
/// 职责：
/// 1. 五个决策操作 (健康评分/优先级/成本/工时/调度)
/// 2. 组合操作 (资产综合评估/工单编制)
/// 3. 传感器读数文件导入
pub struct MaintenanceApi {
    config: EngineConfig,
    engines: MaintenanceEngines,
}

impl MaintenanceApi {
    /// 按配置创建 (配置先校验)
    pub fn new(config: EngineConfig) -> ApiResult<Self> {
        config.validate().map_err(|e| ApiError::ConfigError(e.to_string()))?;
        let engines = MaintenanceEngines::from_config(&config);
        Ok(Self { config, engines })
    }

    /// 按配置管理器的生效配置创建
    pub fn from_manager(manager: &ConfigManager) -> ApiResult<Self> {
        Self::new(manager.config().clone())
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // ==========================================
    // 单项决策
    // ==========================================

    /// 计算资产健康分
    ///
    /// # 返回
    /// - Ok(HealthBreakdown): 健康分及各分项
    /// - Err(ApiError::ValidationError): 读数/风险/年龄非法
    #[instrument(skip(self, request), fields(
        readings = request.readings.len(),
        records = request.history.len()
    ))]
    pub fn compute_asset_health(&self, request: &HealthRequest) -> ApiResult<HealthBreakdown> {
        let breakdown = self
            .engines
            .health
            .breakdown(
                &request.readings,
                &request.history,
                request.age_in_days,
                request.predicted_failure_risk,
                request.as_of,
            )
            .map_err(|e| rejected("compute_asset_health", e))?;

        tracing::debug!(score = breakdown.score, condition = %breakdown.condition, "健康评分完成");
        Ok(breakdown)
    }

    /// 故障预测 -> 优先级分档
    #[instrument(skip(self, request), fields(asset_id = %request.asset.asset_id))]
    pub fn classify_priority(&self, request: &PriorityRequest) -> ApiResult<PriorityResponse> {
        self.priority_for(&request.prediction, &request.asset)
            .map_err(|e| rejected("classify_priority", e))
    }

    /// 估算维护成本
    #[instrument(skip(self, request), fields(parts = request.parts.len()))]
    pub fn estimate_cost(&self, request: &CostRequest) -> ApiResult<CostBreakdown> {
        self.engines
            .cost
            .breakdown(
                request.labor_hours,
                request.labor_rate,
                &request.parts,
                request.overhead_rate,
            )
            .map_err(|e| rejected("estimate_cost", e))
    }

    /// 估算维护工时
    #[instrument(skip(self, request), fields(
        maintenance_type = %request.maintenance_type,
        asset_type = %request.asset_type
    ))]
    pub fn estimate_duration(&self, request: &DurationRequest) -> ApiResult<DurationResponse> {
        Ok(self.duration_for(request))
    }

    /// 调度工单并写回调度结果
    ///
    /// # 返回
    /// - Ok(ScheduleResponse): 调度结果 + 已写入计划时间的工单
    /// - Err(ApiError::CapacityExceeded): 工单数超过上限
    /// - Err(ApiError::InvalidStateTransition): 存在不可重排的工单 (已开工/已终结)
    #[instrument(skip(self, request), fields(
        orders = request.work_orders.len(),
        mode = %self.config.scheduler.mode
    ))]
    pub fn schedule_work_orders(&self, request: ScheduleRequest) -> ApiResult<ScheduleResponse> {
        let scheduler = &self.engines.scheduler;
        let slots = scheduler
            .schedule_work_orders(
                &request.work_orders,
                request.resources,
                request.constraints,
                request.now,
            )
            .map_err(|e| rejected("schedule_work_orders", e))?;

        let mut work_orders = request.work_orders;
        let applied = scheduler
            .apply_schedule(&mut work_orders, &slots)
            .map_err(|e| rejected("schedule_work_orders", e))?;

        tracing::info!(applied, "工单调度完成");
        Ok(ScheduleResponse { slots, work_orders })
    }

    // ==========================================
    // 组合决策
    // ==========================================

    /// 资产综合评估: 健康分 + 优先级 + 越带读数
    ///
    /// 预测故障概率同时作为健康评分的故障风险输入;资产年龄由安装日期推算
    #[instrument(skip(self, request), fields(asset_id = %request.asset.asset_id))]
    pub fn assess_asset(&self, request: &AssessRequest) -> ApiResult<AssessmentResponse> {
        let asset = &request.asset;
        if request.prediction.asset_id != asset.asset_id {
            return Err(rejected(
                "assess_asset",
                ApiError::InvalidInput(format!(
                    "预测所属资产({})与评估资产({})不一致",
                    request.prediction.asset_id, asset.asset_id
                )),
            ));
        }
        if let Some(foreign) = request.readings.iter().find(|r| r.asset_id != asset.asset_id) {
            return Err(rejected(
                "assess_asset",
                ApiError::InvalidInput(format!(
                    "读数所属资产({})与评估资产({})不一致",
                    foreign.asset_id, asset.asset_id
                )),
            ));
        }

        let age_in_days = asset.age_in_days(request.as_of);
        let health = self
            .engines
            .health
            .breakdown(
                &request.readings,
                &request.history,
                f64::from(age_in_days),
                request.prediction.probability,
                request.as_of,
            )
            .map_err(|e| rejected("assess_asset", e))?;
        let priority = self
            .priority_for(&request.prediction, asset)
            .map_err(|e| rejected("assess_asset", e))?;

        let alerts: Vec<SensorAlert> = request
            .readings
            .iter()
            .filter_map(|reading| {
                let status = reading.band_status();
                (status != SensorStatus::Normal).then(|| SensorAlert {
                    sensor_type: reading.sensor_type,
                    value: reading.value,
                    unit: reading.unit.clone(),
                    status,
                    timestamp: reading.timestamp,
                })
            })
            .collect();

        tracing::info!(
            score = health.score,
            tier = %priority.tier,
            alerts = alerts.len(),
            "资产评估完成"
        );

        Ok(AssessmentResponse {
            asset_id: asset.asset_id.clone(),
            age_in_days,
            health,
            priority,
            alerts,
        })
    }

    /// 工单编制: 估算工时与成本,生成待调度工单
    #[instrument(skip(self, request), fields(work_order_id = %request.work_order_id))]
    pub fn plan_work_order(
        &self,
        request: &PlanWorkOrderRequest,
    ) -> ApiResult<PlanWorkOrderResponse> {
        if request.work_order_id.trim().is_empty() {
            return Err(rejected(
                "plan_work_order",
                ApiError::InvalidInput("工单ID不能为空".to_string()),
            ));
        }

        let duration = self.duration_for(&DurationRequest {
            maintenance_type: request.maintenance_type,
            asset_type: request.asset.asset_type.clone(),
            complexity: request.complexity,
        });
        let cost = self
            .engines
            .cost
            .breakdown(
                duration.hours,
                request.labor_rate,
                &request.parts,
                request.overhead_rate,
            )
            .map_err(|e| rejected("plan_work_order", e))?;

        let mut work_order = MaintenanceWorkOrder::new(
            request.work_order_id.clone(),
            request.asset.asset_id.clone(),
            request.maintenance_type,
            request.priority,
            duration.hours,
        );
        work_order.estimated_cost = Some(cost.total_cost);
        work_order.description = request.description.clone();

        Ok(PlanWorkOrderResponse {
            work_order,
            duration,
            cost,
        })
    }

    // ==========================================
    // 数据导入
    // ==========================================

    /// 导入传感器读数文件 (CSV / Excel)
    #[instrument(skip(self, file_path), fields(file = %file_path.as_ref().display()))]
    pub fn import_readings<P: AsRef<Path>>(&self, file_path: P) -> ApiResult<ImportReport> {
        let report = SensorReadingImporter::new()
            .import_file(file_path.as_ref())
            .map_err(|e| rejected("import_readings", e))?;

        for violation in &report.violations {
            tracing::warn!(
                row = violation.row_number,
                field = %violation.field,
                "读数拒收: {}",
                violation.message
            );
        }
        tracing::info!(
            total = report.total_rows,
            accepted = report.accepted(),
            rejected = report.rejected(),
            "读数导入完成"
        );
        Ok(report)
    }

    // ==========================================
    // 内部辅助
    // ==========================================

    fn priority_for(
        &self,
        prediction: &MaintenancePrediction,
        asset: &InfrastructureAsset,
    ) -> ApiResult<PriorityResponse> {
        prediction.validate()?;
        let classifier = &self.engines.priority;
        let score = classifier.weighted_score(
            asset.criticality,
            prediction.timeframe.urgency,
            prediction.probability,
        )?;
        let tier = classifier.classify_priority(prediction, asset)?;
        Ok(PriorityResponse {
            score,
            tier,
            work_order_priority: tier.into(),
        })
    }

    fn duration_for(&self, request: &DurationRequest) -> DurationResponse {
        let estimator = &self.engines.duration;
        DurationResponse {
            hours: estimator.estimate_duration(
                request.maintenance_type,
                &request.asset_type,
                request.complexity,
            ),
            base_hours: estimator.base_hours(request.maintenance_type, request.complexity),
            asset_multiplier: estimator.asset_multiplier(&request.asset_type),
        }
    }
}

/// 记录拒收原因并转换为 API 错误
fn rejected<E: Into<ApiError>>(operation: &'static str, err: E) -> ApiError {
    let err = err.into();
    tracing::warn!(operation, code = err.code(), "请求被拒绝: {}", err);
    err
}
