//! Basic walkthrough: one stat, one task, one level-up.
//!
//! Run with: cargo run --example basic

use questlog::{Stat, Task, UserProfile};
use std::collections::HashMap;

fn main() {
    let stat = Stat::new("Focus").unwrap();
    let mut profile = UserProfile::default();

    println!("=== Stat ===");
    println!("{}", stat);

    // The first few level brackets on the default curve.
    println!("\n=== Level brackets ===");
    for level in 1..=5 {
        let (min, max) = stat.bounds_for_level(level);
        println!("level {level}: {min} - {max} exp");
    }

    // Complete a handful of tasks and accumulate the rewards.
    println!("\n=== Completing tasks ===");
    let mut total = 0;
    for name in ["Read a chapter", "Morning run", "Practice scales"] {
        let mut task = Task::new(name, stat.key()).unwrap();
        task.set_base_exp_reward(60).unwrap();
        let reward = task.complete().unwrap();
        total += reward;
        println!("{name}: +{reward} exp");
    }

    profile
        .merge_stat_exp(HashMap::from([(stat.key(), total)]))
        .unwrap();

    let snapshot = stat.snapshot(profile.stat_exp()[&stat.key()]);
    println!("\n=== Snapshot ===");
    println!("{}", serde_json::to_string_pretty(&snapshot).unwrap());
}
