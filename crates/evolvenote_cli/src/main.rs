//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `evolvenote_core` linkage.
//! - Run one scripted composition so the list/schedule handoff can be eyeballed.

use evolvenote_core::{
    format_display_date, Clock, ComposerConfig, GoalComposer, GoalProgress, StartMode,
    SystemClock,
};

fn main() {
    println!("evolvenote_core ping={}", evolvenote_core::ping());
    println!("evolvenote_core version={}", evolvenote_core::core_version());

    let mut composer = GoalComposer::new(ComposerConfig::default(), SystemClock);
    for (index, name) in ["Practice vocabulary", "Write 5 sentences", "Listen 20 min", "Extra"]
        .into_iter()
        .enumerate()
    {
        match composer.open_schedule() {
            Ok(schedule) => {
                schedule.set_goal_name(name);
                if index == 0 {
                    schedule.select_start_mode(StartMode::Tomorrow);
                }
            }
            Err(err) => {
                println!("schedule step={index} rejected: {err}");
                continue;
            }
        }
        if let Err(err) = composer.continue_from_schedule() {
            println!("continue step={index} rejected: {err}");
        }
    }

    println!(
        "draft tasks={} capacity_reached={}",
        composer.tasks().len(),
        composer.capacity_reached()
    );

    match composer.finalize("Learn Spanish") {
        Ok(goal) => {
            println!("goal id={} tasks={}", goal.uuid, goal.tasks.len());
            if let Some(window) = goal.window {
                let progress = GoalProgress::compute(window, SystemClock.today());
                println!(
                    "window start={} finish={} percent={}",
                    format_display_date(window.start),
                    format_display_date(window.finish),
                    progress.percent
                );
            }
        }
        Err(err) => println!("finalize rejected: {err}"),
    }
}
