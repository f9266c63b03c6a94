use chrono::Duration;
use questlog::{Stat, StatTips, Task, TaskStatus, UserProfile};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::{BTreeMap, HashMap};

/// A full day-in-the-life flow: tasks are created against a stat, swept
/// for due dates, completed (one of them late), and their rewards merged
/// into the profile, which then renders the stat and delivers a tip.
#[test]
fn test_complete_progression_flow() {
    let mut stat = Stat::new("Focus").unwrap();
    stat.set_tips(StatTips::with_tips(BTreeMap::from([(
        0,
        vec!["every journey starts small".to_string()],
    )])));

    let mut workout = Task::new("Morning workout", stat.key()).unwrap();
    workout.set_base_exp_reward(100).unwrap();
    let mut chores = Task::new("Do the dishes", stat.key()).unwrap();
    chores.set_base_exp_reward(40).unwrap();
    let due = chores.creation_time() + Duration::hours(1);
    chores.set_due_date(due).unwrap();

    let mut profile =
        UserProfile::new(HashMap::new(), vec![workout.clone(), chores.clone()]).unwrap();
    assert_eq!(profile.tasks().len(), 2);

    // The sweep job runs after the due date has elapsed.
    let sweep_time = due + Duration::minutes(30);
    for task in profile.tasks_mut() {
        if task.due_date().is_some() {
            task.check_due_date_at(sweep_time).unwrap();
        }
    }
    assert_eq!(profile.tasks()[1].status(), TaskStatus::PastDue);

    // Complete both tasks and fold the rewards into the exp totals.
    let mut total = 0;
    for task in profile.tasks_mut() {
        total += task.complete_at(sweep_time).unwrap();
    }
    // workout: round(100 · 0.8 / 2) · 2 = 80
    // chores:  round(40 · 0.8 / 2) · 2 = 32, then round(32 · 0.75) = 24
    assert_eq!(total, 104);
    assert_eq!(profile.tasks()[0].status(), TaskStatus::Completed);
    assert_eq!(
        profile.tasks()[1].status(),
        TaskStatus::CompletedAfterDueDate
    );

    profile
        .merge_stat_exp(HashMap::from([(stat.key(), total)]))
        .unwrap();
    assert_eq!(profile.stat_exp()[&stat.key()], 104);

    // 104 exp reaches level 1 on the default curve; render and tip.
    let snapshot = stat.snapshot(profile.stat_exp()[&stat.key()]);
    assert_eq!(snapshot.level, 1);
    assert_eq!(snapshot.icon_name, "focus_0");

    let mut rng = StdRng::seed_from_u64(1);
    let tip = stat.tips_mut().get_tip_for_level_with(1, &mut rng).unwrap();
    assert_eq!(
        tip,
        "You have passed level 0! That means that: every journey starts small"
    );
}

#[test]
fn test_completed_tasks_stay_completed_through_sweeps() {
    let stat = Stat::new("Focus").unwrap();
    let mut task = Task::new("Write a letter", stat.key()).unwrap();
    let due = task.creation_time() + Duration::hours(1);
    task.set_due_date(due).unwrap();

    // Completed on time, then swept long after the due date.
    task.complete_at(due - Duration::minutes(10)).unwrap();
    assert_eq!(task.status(), TaskStatus::Completed);
    task.check_due_date_at(due + Duration::days(1)).unwrap();
    assert_eq!(task.status(), TaskStatus::Completed);
}

#[test]
fn test_reward_is_a_delta_not_applied_by_the_task() {
    let stat = Stat::new("Focus").unwrap();
    let mut task = Task::new("Read a chapter", stat.key()).unwrap();
    let mut profile = UserProfile::new(
        HashMap::from([(stat.key(), 500)]),
        Vec::new(),
    )
    .unwrap();

    let reward = task.complete().unwrap();
    // Completion alone must not touch the profile.
    assert_eq!(profile.stat_exp()[&stat.key()], 500);

    let total = profile.stat_exp()[&stat.key()] + reward;
    profile
        .merge_stat_exp(HashMap::from([(stat.key(), total)]))
        .unwrap();
    assert_eq!(profile.stat_exp()[&stat.key()], 508);
}

#[test]
fn test_zero_reward_task() {
    let stat = Stat::new("Focus").unwrap();
    let mut task = Task::new("Tiny habit", stat.key()).unwrap();
    task.set_base_exp_reward(0).unwrap();
    assert_eq!(task.complete().unwrap(), 0);
    assert_eq!(task.status(), TaskStatus::Completed);
}

#[test]
fn test_abandoned_task_can_still_be_completed_once() {
    // Abandonment is external; the engine only refuses re-completion.
    let stat = Stat::new("Focus").unwrap();
    let mut task = Task::new("Old project", stat.key()).unwrap();
    task.set_status(TaskStatus::Abandoned);
    let reward = task.complete().unwrap();
    assert_eq!(reward, 8);
    assert_eq!(task.status(), TaskStatus::Completed);
    assert!(task.complete().is_err());
}

#[test]
fn test_profile_serialization_round_trip() {
    let stat = Stat::new("Focus").unwrap();
    let task = Task::new("Read a chapter", stat.key()).unwrap();
    let profile = UserProfile::new(
        HashMap::from([(stat.key(), 150)]),
        vec![task],
    )
    .unwrap();

    let json = serde_json::to_string(&profile).unwrap();
    assert!(json.contains("\"In Progress\""));
    let back: UserProfile = serde_json::from_str(&json).unwrap();
    assert_eq!(back, profile);
}
