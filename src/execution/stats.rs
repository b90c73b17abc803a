/// Pure stats reduction over execution history
///
/// Stateless and safe to recompute on every fetch; derives summary metrics
/// from whatever page of executions the caller has.

use crate::execution::types::{Execution, ExecutionStats, ExecutionStatus};

/// Summarize a page of executions
///
/// `success_rate` is the percentage of completed executions, defined as 0
/// for an empty history. `avg_duration_ms` averages only over executions
/// that carry a duration; 0 when none qualify. Never divides by zero.
pub fn summarize(executions: &[Execution]) -> ExecutionStats {
    let total = executions.len();
    if total == 0 {
        return ExecutionStats {
            total: 0,
            success_rate: 0.0,
            avg_duration_ms: 0.0,
        };
    }

    let completed = executions
        .iter()
        .filter(|e| e.status == ExecutionStatus::Completed)
        .count();
    let success_rate = 100.0 * completed as f64 / total as f64;

    let durations: Vec<u64> = executions.iter().filter_map(|e| e.duration_ms).collect();
    let avg_duration_ms = if durations.is_empty() {
        0.0
    } else {
        durations.iter().sum::<u64>() as f64 / durations.len() as f64
    };

    ExecutionStats {
        total,
        success_rate,
        avg_duration_ms,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn execution(status: ExecutionStatus, duration_ms: Option<u64>) -> Execution {
        Execution {
            id: "e1".to_string(),
            flow_id: "f1".to_string(),
            status,
            started_at: Utc::now(),
            completed_at: None,
            duration_ms,
            error_message: None,
            output: None,
            total_nodes: 1,
            completed_nodes: 1,
        }
    }

    #[test]
    fn empty_history_is_all_zeros() {
        let stats = summarize(&[]);
        assert_eq!(
            stats,
            ExecutionStats {
                total: 0,
                success_rate: 0.0,
                avg_duration_ms: 0.0,
            }
        );
        assert!(!stats.success_rate.is_nan());
    }

    #[test]
    fn seven_of_ten_completed() {
        let mut history: Vec<Execution> = (1..=7)
            .map(|i| execution(ExecutionStatus::Completed, Some(i * 100)))
            .collect();
        history.extend((0..3).map(|_| execution(ExecutionStatus::Failed, None)));

        let stats = summarize(&history);
        assert_eq!(stats.total, 10);
        assert_eq!(stats.success_rate, 70.0);
        // (100 + 200 + ... + 700) / 7 = 400
        assert_eq!(stats.avg_duration_ms, 400.0);
    }

    #[test]
    fn no_durations_yields_zero_average() {
        let history = vec![
            execution(ExecutionStatus::Failed, None),
            execution(ExecutionStatus::Running, None),
        ];
        let stats = summarize(&history);
        assert_eq!(stats.avg_duration_ms, 0.0);
    }
}
