//! Day-in-the-life flow: due dates, a late completion, and tips.
//!
//! Run with: cargo run --example daily_grind

use chrono::{Duration, Utc};
use questlog::{Stat, StatTips, Task, TaskStatus, UserProfile};
use std::collections::{BTreeMap, HashMap};

fn main() {
    let mut stat = Stat::new("Discipline").unwrap();
    stat.set_tips(StatTips::with_tips(BTreeMap::from([
        (0, vec!["every journey starts small".to_string()]),
        (
            1,
            vec![
                "streaks build momentum".to_string(),
                "consistency beats intensity".to_string(),
            ],
        ),
    ])));

    let mut on_time = Task::new("Morning workout", stat.key()).unwrap();
    on_time.set_base_exp_reward(120).unwrap();
    on_time
        .set_due_date(on_time.creation_time() + Duration::hours(12))
        .unwrap();

    let mut late = Task::new("File the report", stat.key()).unwrap();
    late.set_base_exp_reward(80).unwrap();
    late.set_due_date(late.creation_time() + Duration::hours(1))
        .unwrap();

    let mut profile = UserProfile::new(HashMap::new(), vec![on_time, late]).unwrap();

    // The sweep job runs two hours in; the report is now past due.
    let sweep_time = Utc::now() + Duration::hours(2);
    println!("=== Due-date sweep ===");
    for task in profile.tasks_mut() {
        task.check_due_date_at(sweep_time).unwrap();
        println!("{}: {}", task.display_name(), task.status());
    }

    println!("\n=== Completing tasks ===");
    let mut total = 0;
    for task in profile.tasks_mut() {
        let reward = task.complete_at(sweep_time).unwrap();
        total += reward;
        let late_marker = if task.status() == TaskStatus::CompletedAfterDueDate {
            " (late, penalized)"
        } else {
            ""
        };
        println!("{}: +{} exp{}", task.display_name(), reward, late_marker);
    }

    profile
        .merge_stat_exp(HashMap::from([(stat.key(), total)]))
        .unwrap();
    let exp = profile.stat_exp()[&stat.key()];

    let snapshot = stat.snapshot(exp);
    println!("\n=== {} ===", snapshot.display_name);
    println!(
        "level {} ({} / {} exp), icon {}",
        snapshot.level, snapshot.current_exp, snapshot.next_level_exp_req, snapshot.icon_name
    );

    if snapshot.level >= 0 {
        match stat.tips_mut().get_tip_for_level(snapshot.level) {
            Ok(tip) => println!("{tip}"),
            Err(err) => println!("(no tip: {err})"),
        }
    }
}
