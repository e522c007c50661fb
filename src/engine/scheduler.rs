// ==========================================
// 智慧朝觐运维平台 - 工单调度引擎
// ==========================================
// 职责: 优先级优先的贪心排布 (非最优调度,启发式)
// 输入: 待调度工单 + 资源 + 作业时间约束 + 起始时刻
// 输出: 每张工单的计划开始时间
// ==========================================
// 规则:
// 1) 按优先级降序稳定排序 (emergency > critical > high > medium > low)
// 2) 不允许周末作业时,游标落在周末则顺延到下一个工作日 (保留时刻)
// 3) 开始时间 = 游标;游标 += 工时
// 4) 游标小时数 >= 收工时刻 -> 次日 day_start_hour 整点
// 单时间线模式即 1 个班组;多班组模式每单分配给游标最早的班组
// ==========================================

use crate::config::{SchedulerConfig, SchedulingMode};
use crate::domain::work_order::{
    MaintenanceWorkOrder, ResourceCapacity, ScheduledSlot, SchedulingConstraints,
};
use crate::error::{ensure_non_negative, EngineError, EngineResult};
use chrono::{Datelike, Duration, NaiveDateTime, NaiveTime, Timelike};
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

/// 单张工单工时上限 (小时)
pub const MAX_ORDER_HOURS: f64 = 8760.0;

// ==========================================
// WorkOrderScheduler - 工单调度引擎
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct WorkOrderScheduler {
    config: SchedulerConfig,
}

impl WorkOrderScheduler {
    pub fn new(config: SchedulerConfig) -> Self {
        Self { config }
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 调度工单
    ///
    /// # 参数
    /// - `orders`: 待调度工单
    /// - `resources`: 可用人员/设备 (单时间线模式仅校验)
    /// - `constraints`: 收工时刻与周末规则
    /// - `now`: 起始时刻 (设施本地时间)
    ///
    /// # 返回
    /// 按分配顺序 (优先级降序) 排列的调度结果;空输入返回空结果
    ///
    /// # 错误
    /// - 工单数超过 max_orders -> CapacityExceeded
    /// - 工时非法、资源为 0、收工时刻非法 -> Validation
    pub fn schedule_work_orders(
        &self,
        orders: &[MaintenanceWorkOrder],
        resources: ResourceCapacity,
        constraints: SchedulingConstraints,
        now: NaiveDateTime,
    ) -> EngineResult<Vec<ScheduledSlot>> {
        if orders.len() > self.config.max_orders {
            return Err(EngineError::CapacityExceeded {
                requested: orders.len(),
                limit: self.config.max_orders,
            });
        }
        let day_start = self.validate_inputs(orders, resources, constraints)?;

        if orders.is_empty() {
            return Ok(Vec::new());
        }

        // 1. 优先级降序稳定排序
        let mut queue: Vec<&MaintenanceWorkOrder> = orders.iter().collect();
        queue.sort_by(|a, b| b.priority.rank().cmp(&a.priority.rank()));

        // 2. 班组游标 (最小堆: 游标最早者优先, 同时刻取序号小者)
        let crew_count = self.crew_count(resources);
        let first_cursor = self.skip_weekend(now, constraints)?;
        let mut crews: BinaryHeap<Reverse<(NaiveDateTime, usize)>> =
            (0..crew_count).map(|crew| Reverse((first_cursor, crew))).collect();

        // 3. 逐单分配
        let mut slots = Vec::with_capacity(queue.len());
        for order in queue {
            let Reverse((start, crew)) = crews
                .pop()
                .ok_or_else(|| EngineError::validation("resources", "无可用班组"))?;

            let next = self.advance(start, order.estimated_duration_hours, constraints, day_start)?;
            let next = self.skip_weekend(next, constraints)?;
            crews.push(Reverse((next, crew)));

            slots.push(ScheduledSlot {
                work_order_id: order.work_order_id.clone(),
                scheduled_start: start,
                duration_hours: order.estimated_duration_hours,
                crew,
            });
        }

        Ok(slots)
    }

    /// 将调度结果写回工单 (按工单ID匹配)
    ///
    /// # 返回
    /// 实际写入的工单数
    pub fn apply_schedule(
        &self,
        orders: &mut [MaintenanceWorkOrder],
        slots: &[ScheduledSlot],
    ) -> EngineResult<usize> {
        let by_id: HashMap<&str, &ScheduledSlot> = slots
            .iter()
            .map(|slot| (slot.work_order_id.as_str(), slot))
            .collect();

        let mut applied = 0;
        for order in orders.iter_mut() {
            if let Some(slot) = by_id.get(order.work_order_id.as_str()) {
                order.apply_slot(slot)?;
                applied += 1;
            }
        }
        Ok(applied)
    }

    // ==========================================
    // 内部辅助
    // ==========================================

    /// 校验输入,返回换日后的开工时刻
    fn validate_inputs(
        &self,
        orders: &[MaintenanceWorkOrder],
        resources: ResourceCapacity,
        constraints: SchedulingConstraints,
    ) -> EngineResult<NaiveTime> {
        if resources.personnel == 0 || resources.equipment == 0 {
            return Err(EngineError::validation(
                "resources",
                format!(
                    "人员与设备必须至少为 1: personnel={}, equipment={}",
                    resources.personnel, resources.equipment
                ),
            ));
        }
        if constraints.working_hours_per_day == 0
            || constraints.working_hours_per_day > 24
            || constraints.working_hours_per_day <= self.config.day_start_hour
        {
            return Err(EngineError::validation(
                "constraints.working_hours_per_day",
                format!(
                    "收工时刻 {} 必须位于 ({}, 24]",
                    constraints.working_hours_per_day, self.config.day_start_hour
                ),
            ));
        }
        for order in orders {
            let hours = ensure_non_negative(
                &format!("work_order[{}].estimated_duration_hours", order.work_order_id),
                order.estimated_duration_hours,
            )?;
            if hours > MAX_ORDER_HOURS {
                return Err(EngineError::validation(
                    format!("work_order[{}].estimated_duration_hours", order.work_order_id),
                    format!("工时 {} 超过上限 {}", hours, MAX_ORDER_HOURS),
                ));
            }
        }

        NaiveTime::from_hms_opt(self.config.day_start_hour, 0, 0).ok_or_else(|| {
            EngineError::validation(
                "scheduler.day_start_hour",
                format!("非法小时: {}", self.config.day_start_hour),
            )
        })
    }

    fn crew_count(&self, resources: ResourceCapacity) -> usize {
        match self.config.mode {
            SchedulingMode::SingleTimeline => 1,
            SchedulingMode::ParallelCrews => resources.personnel.min(resources.equipment) as usize,
        }
    }

    /// 不允许周末作业时,把落在周末的游标顺延到下一个工作日 (保留时刻)
    fn skip_weekend(
        &self,
        cursor: NaiveDateTime,
        constraints: SchedulingConstraints,
    ) -> EngineResult<NaiveDateTime> {
        if constraints.allow_weekends {
            return Ok(cursor);
        }
        let mut cursor = cursor;
        // 配置校验保证一周内至少一个工作日
        for _ in 0..7 {
            if !self.config.weekend_days.contains(&cursor.weekday()) {
                return Ok(cursor);
            }
            cursor = cursor
                .checked_add_signed(Duration::days(1))
                .ok_or_else(overflow)?;
        }
        Err(EngineError::validation(
            "scheduler.weekend_days",
            "一周内至少需要一个工作日",
        ))
    }

    /// 游标前移工时;越过收工时刻则换到次日开工时刻
    fn advance(
        &self,
        start: NaiveDateTime,
        hours: f64,
        constraints: SchedulingConstraints,
        day_start: NaiveTime,
    ) -> EngineResult<NaiveDateTime> {
        let seconds = (hours * 3600.0).round() as i64;
        let end = start
            .checked_add_signed(Duration::seconds(seconds))
            .ok_or_else(overflow)?;

        if end.hour() >= constraints.working_hours_per_day {
            let next_day = end.date().succ_opt().ok_or_else(overflow)?;
            return Ok(next_day.and_time(day_start));
        }
        Ok(end)
    }
}

fn overflow() -> EngineError {
    EngineError::validation("scheduled_start", "日期超出可表示范围")
}
