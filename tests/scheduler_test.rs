// ==========================================
// 工单调度集成测试
// ==========================================
// 场景: 优先级排序 -> 收工换日 -> 周末顺延 -> 多班组并行 -> 工单生命周期
// ==========================================

#[path = "helpers/test_data_builder.rs"]
mod test_data_builder;

use chrono::{Datelike, Weekday};
use smart_hajj_maintenance::config::{SchedulerConfig, SchedulingMode};
use smart_hajj_maintenance::domain::{
    ResourceCapacity, SchedulingConstraints, WorkOrderPriority, WorkOrderStatus,
};
use smart_hajj_maintenance::engine::{HealthScorer, WorkOrderScheduler};
use smart_hajj_maintenance::EngineError;
use test_data_builder::{local, utc, work_order};

const ONE_CREW: ResourceCapacity = ResourceCapacity {
    personnel: 1,
    equipment: 1,
};

const WEEKDAYS_UNTIL_17: SchedulingConstraints = SchedulingConstraints {
    working_hours_per_day: 17,
    allow_weekends: false,
};

#[test]
fn test_single_timeline_priority_order_and_rollover() {
    let scheduler = WorkOrderScheduler::default();
    let orders = vec![
        work_order("WO-A", WorkOrderPriority::Low, 2.0),
        work_order("WO-B", WorkOrderPriority::Emergency, 3.0),
        work_order("WO-C", WorkOrderPriority::High, 4.0),
        work_order("WO-D", WorkOrderPriority::High, 1.0),
        work_order("WO-E", WorkOrderPriority::Medium, 1.5),
    ];
    // 2026-05-25 为周一
    let now = local(2026, 5, 25, 8, 0);

    let slots = scheduler
        .schedule_work_orders(&orders, ONE_CREW, WEEKDAYS_UNTIL_17, now)
        .unwrap();

    let plan: Vec<(&str, _)> = slots
        .iter()
        .map(|s| (s.work_order_id.as_str(), s.scheduled_start))
        .collect();
    assert_eq!(
        plan,
        vec![
            ("WO-B", local(2026, 5, 25, 8, 0)),
            ("WO-C", local(2026, 5, 25, 11, 0)),
            ("WO-D", local(2026, 5, 25, 15, 0)),
            // 16:00 + 1.5h = 17:30 越过收工时刻
            ("WO-E", local(2026, 5, 25, 16, 0)),
            ("WO-A", local(2026, 5, 26, 8, 0)),
        ]
    );
    assert!(slots.iter().all(|s| s.crew == 0));
}

#[test]
fn test_friday_overrun_resumes_monday_morning() {
    let scheduler = WorkOrderScheduler::default();
    let orders = vec![
        work_order("WO-FRI", WorkOrderPriority::Critical, 3.0),
        work_order("WO-NEXT", WorkOrderPriority::Medium, 2.0),
    ];
    let now = local(2026, 5, 29, 15, 0);
    assert_eq!(now.weekday(), Weekday::Fri);

    let slots = scheduler
        .schedule_work_orders(&orders, ONE_CREW, WEEKDAYS_UNTIL_17, now)
        .unwrap();

    assert_eq!(slots[0].scheduled_start, now);
    assert_eq!(slots[1].scheduled_start, local(2026, 6, 1, 8, 0));
    assert_eq!(slots[1].scheduled_start.weekday(), Weekday::Mon);
}

#[test]
fn test_weekend_start_respected_only_when_disallowed() {
    let scheduler = WorkOrderScheduler::default();
    let orders = vec![work_order("WO-SAT", WorkOrderPriority::High, 1.0)];
    let saturday = local(2026, 5, 23, 10, 0);

    let blocked = scheduler
        .schedule_work_orders(&orders, ONE_CREW, WEEKDAYS_UNTIL_17, saturday)
        .unwrap();
    assert_eq!(blocked[0].scheduled_start, local(2026, 5, 25, 10, 0));

    let allowed = scheduler
        .schedule_work_orders(
            &orders,
            ONE_CREW,
            SchedulingConstraints {
                working_hours_per_day: 17,
                allow_weekends: true,
            },
            saturday,
        )
        .unwrap();
    assert_eq!(allowed[0].scheduled_start, saturday);
}

#[test]
fn test_configured_weekend_days() {
    // 周五/周六休息
    let scheduler = WorkOrderScheduler::new(SchedulerConfig {
        weekend_days: vec![Weekday::Fri, Weekday::Sat],
        ..SchedulerConfig::default()
    });
    let orders = vec![work_order("WO-1", WorkOrderPriority::High, 1.0)];
    let friday = local(2026, 5, 29, 9, 0);

    let slots = scheduler
        .schedule_work_orders(&orders, ONE_CREW, WEEKDAYS_UNTIL_17, friday)
        .unwrap();
    assert_eq!(slots[0].scheduled_start, local(2026, 5, 31, 9, 0));
    assert_eq!(slots[0].scheduled_start.weekday(), Weekday::Sun);
}

#[test]
fn test_parallel_crews_take_earliest_free_crew() {
    let scheduler = WorkOrderScheduler::new(SchedulerConfig {
        mode: SchedulingMode::ParallelCrews,
        ..SchedulerConfig::default()
    });
    let orders = vec![
        work_order("WO-1", WorkOrderPriority::Emergency, 4.0),
        work_order("WO-2", WorkOrderPriority::Critical, 2.0),
        work_order("WO-3", WorkOrderPriority::High, 1.0),
        work_order("WO-4", WorkOrderPriority::Low, 1.0),
    ];
    let now = local(2026, 5, 25, 8, 0);
    let resources = ResourceCapacity {
        personnel: 2,
        equipment: 3,
    };

    let slots = scheduler
        .schedule_work_orders(&orders, resources, WEEKDAYS_UNTIL_17, now)
        .unwrap();
    let plan: Vec<(&str, usize, _)> = slots
        .iter()
        .map(|s| (s.work_order_id.as_str(), s.crew, s.scheduled_start))
        .collect();

    assert_eq!(
        plan,
        vec![
            ("WO-1", 0, local(2026, 5, 25, 8, 0)),
            ("WO-2", 1, local(2026, 5, 25, 8, 0)),
            ("WO-3", 1, local(2026, 5, 25, 10, 0)),
            ("WO-4", 1, local(2026, 5, 25, 11, 0)),
        ]
    );
}

#[test]
fn test_resources_ignored_by_single_timeline() {
    let scheduler = WorkOrderScheduler::default();
    let orders = vec![
        work_order("WO-1", WorkOrderPriority::High, 1.0),
        work_order("WO-2", WorkOrderPriority::High, 1.0),
    ];
    let now = local(2026, 5, 25, 8, 0);
    let many = ResourceCapacity {
        personnel: 8,
        equipment: 8,
    };

    let a = scheduler
        .schedule_work_orders(&orders, ONE_CREW, WEEKDAYS_UNTIL_17, now)
        .unwrap();
    let b = scheduler
        .schedule_work_orders(&orders, many, WEEKDAYS_UNTIL_17, now)
        .unwrap();
    assert_eq!(a, b);
    assert_eq!(b[1].scheduled_start, local(2026, 5, 25, 9, 0));
}

#[test]
fn test_scheduling_is_deterministic() {
    let scheduler = WorkOrderScheduler::default();
    let orders: Vec<_> = (0..20)
        .map(|i| {
            let priority = WorkOrderPriority::ALL[i % WorkOrderPriority::ALL.len()];
            work_order(&format!("WO-{:02}", i), priority, 0.5 + (i % 4) as f64)
        })
        .collect();
    let now = local(2026, 5, 25, 8, 0);

    let first = scheduler
        .schedule_work_orders(&orders, ONE_CREW, WEEKDAYS_UNTIL_17, now)
        .unwrap();
    let second = scheduler
        .schedule_work_orders(&orders, ONE_CREW, WEEKDAYS_UNTIL_17, now)
        .unwrap();
    assert_eq!(first, second);
    assert_eq!(first.len(), orders.len());

    // 开始时间在分配顺序上单调不减
    assert!(first
        .windows(2)
        .all(|w| w[0].scheduled_start <= w[1].scheduled_start));
}

#[test]
fn test_invalid_requests_rejected() {
    let scheduler = WorkOrderScheduler::new(SchedulerConfig {
        max_orders: 2,
        ..SchedulerConfig::default()
    });
    let now = local(2026, 5, 25, 8, 0);
    let three = vec![
        work_order("WO-1", WorkOrderPriority::High, 1.0),
        work_order("WO-2", WorkOrderPriority::High, 1.0),
        work_order("WO-3", WorkOrderPriority::High, 1.0),
    ];

    let err = scheduler
        .schedule_work_orders(&three, ONE_CREW, WEEKDAYS_UNTIL_17, now)
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::CapacityExceeded {
            requested: 3,
            limit: 2
        }
    );

    let negative = vec![work_order("WO-NEG", WorkOrderPriority::High, -1.0)];
    assert!(scheduler
        .schedule_work_orders(&negative, ONE_CREW, WEEKDAYS_UNTIL_17, now)
        .unwrap_err()
        .is_validation());

    let no_staff = ResourceCapacity {
        personnel: 0,
        equipment: 1,
    };
    assert!(scheduler
        .schedule_work_orders(&three[..1], no_staff, WEEKDAYS_UNTIL_17, now)
        .unwrap_err()
        .is_validation());

    let before_opening = SchedulingConstraints {
        working_hours_per_day: 8,
        allow_weekends: false,
    };
    assert!(scheduler
        .schedule_work_orders(&three[..1], ONE_CREW, before_opening, now)
        .unwrap_err()
        .is_validation());

    assert!(scheduler
        .schedule_work_orders(&[], ONE_CREW, WEEKDAYS_UNTIL_17, now)
        .unwrap()
        .is_empty());
}

#[test]
fn test_work_order_lifecycle_feeds_health_history() {
    let scheduler = WorkOrderScheduler::default();
    let mut orders = vec![
        work_order("WO-LIFT", WorkOrderPriority::Critical, 2.0),
        work_order("WO-PUMP", WorkOrderPriority::Low, 1.0),
    ];
    let slots = scheduler
        .schedule_work_orders(&orders, ONE_CREW, WEEKDAYS_UNTIL_17, local(2026, 5, 25, 8, 0))
        .unwrap();
    assert_eq!(scheduler.apply_schedule(&mut orders, &slots).unwrap(), 2);
    assert!(orders.iter().all(|o| o.status == WorkOrderStatus::Scheduled));
    assert_eq!(orders[1].scheduled_start, Some(local(2026, 5, 25, 10, 0)));

    // 未开工不可完工
    let err = orders[0].complete(utc(2026, 5, 25, 10), 300.0, Some(9)).unwrap_err();
    assert!(matches!(err, EngineError::InvalidStateTransition { .. }));

    orders[0].start().unwrap();
    let record = orders[0].complete(utc(2026, 5, 25, 10), 300.0, Some(9)).unwrap();
    assert_eq!(orders[0].status, WorkOrderStatus::Completed);
    assert_eq!(record.work_order_id.as_deref(), Some("WO-LIFT"));

    // 已完工工单不可重排或取消
    assert!(scheduler.apply_schedule(&mut orders, &slots).is_err());
    assert!(orders[0].cancel().is_err());
    orders[1].cancel().unwrap();

    let scorer = HealthScorer::default();
    let maintenance = scorer
        .maintenance_health(&[record], utc(2026, 6, 1, 0))
        .unwrap();
    assert!((maintenance - 0.9).abs() < 1e-9);
}
