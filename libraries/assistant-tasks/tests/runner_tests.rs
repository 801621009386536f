//! Scheduling, ordering and escalation behavior of the task runner

use assistant_tasks::{RunnerOptions, TaskRunner, TaskState};
use std::sync::{Arc, Mutex};
use std::time::Duration;

fn hidden_runner() -> TaskRunner {
    TaskRunner::new(RunnerOptions {
        show_progress: false,
        grace_period: Duration::from_millis(10),
        ..RunnerOptions::default()
    })
}

#[tokio::test]
async fn test_dependent_runs_after_dependency() {
    let runner = hidden_runner();
    let log = Arc::new(Mutex::new(Vec::new()));

    let first_log = Arc::clone(&log);
    let first = runner.schedule("First", (), |scope, ()| async move {
        scope.started();
        tokio::time::sleep(Duration::from_millis(50)).await;
        first_log.lock().unwrap().push("first");
        Ok(20)
    });

    let second_log = Arc::clone(&log);
    let second = runner.schedule("Second", first.clone(), |scope, value| async move {
        scope.started();
        second_log.lock().unwrap().push("second");
        Ok(*value + 1)
    });

    let result = runner.run(async move { Ok(*second.await?) }).await.unwrap();

    assert_eq!(result, 21);
    assert_eq!(*log.lock().unwrap(), vec!["first", "second"]);
    assert_eq!(first.state(), TaskState::Completed);
}

#[tokio::test]
async fn test_tuple_dependencies_resolve_every_handle() {
    let runner = hidden_runner();

    let a = runner.schedule("A", (), |_, ()| async { Ok(1_u32) });
    let b = runner.schedule("B", (), |_, ()| async { Ok("two".to_string()) });
    let c = runner.schedule("C", (), |_, ()| async {
        tokio::time::sleep(Duration::from_millis(20)).await;
        Ok(vec![3_u8])
    });

    let combined = runner.schedule("Combine", (a, b, c), |_, (a, b, c)| async move {
        Ok(format!("{a}-{b}-{}", c[0]))
    });

    let result = runner.run(async move { Ok(combined.await?) }).await.unwrap();
    assert_eq!(result.as_str(), "1-two-3");
}

#[tokio::test]
async fn test_handle_shared_by_many_dependents() {
    let runner = hidden_runner();
    let source = runner.schedule("Source", (), |_, ()| async { Ok(vec![1, 2, 3]) });

    let sum = runner.schedule("Sum", source.clone(), |_, v| async move {
        Ok(v.iter().sum::<i32>())
    });
    let len = runner.schedule("Len", source.clone(), |_, v| async move { Ok(v.len()) });

    let (sum, len) = runner
        .run(async move { Ok((*sum.await?, *len.await?)) })
        .await
        .unwrap();

    assert_eq!(sum, 6);
    assert_eq!(len, 3);
    assert_eq!(*source.result().await.unwrap(), vec![1, 2, 3]);
}

#[tokio::test]
async fn test_fatal_failure_ends_run() {
    let runner = hidden_runner();

    let failing = runner.schedule("Connecting to DB", (), |scope, ()| async move {
        scope.started();
        Err::<(), _>(anyhow::anyhow!("connection refused"))
    });
    let slow = runner.schedule("Slow", (), |_, ()| async {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(())
    });

    let fatal = runner.run(async move { Ok(*slow.await?) }).await.unwrap_err();

    assert_eq!(fatal.task, "Connecting to DB");
    assert_eq!(fatal.details, "connection refused");
    assert_eq!(
        fatal.to_string(),
        "Error: Task \"Connecting to DB\" failed: connection refused"
    );
    assert_eq!(failing.state(), TaskState::Error);
}

#[tokio::test]
async fn test_first_fatal_failure_wins() {
    let runner = hidden_runner();

    let _early = runner.schedule("Early", (), |_, ()| async {
        tokio::time::sleep(Duration::from_millis(10)).await;
        Err::<(), _>(anyhow::anyhow!("early failure"))
    });
    let _late = runner.schedule("Late", (), |_, ()| async {
        tokio::time::sleep(Duration::from_millis(80)).await;
        Err::<(), _>(anyhow::anyhow!("late failure"))
    });

    let fatal = runner
        .run(async {
            tokio::time::sleep(Duration::from_millis(200)).await;
            Ok(())
        })
        .await
        .unwrap_err();
    assert_eq!(fatal.task, "Early");

    tokio::time::sleep(Duration::from_millis(150)).await;
    assert_eq!(runner.fatal_error().unwrap().task, "Early");
}

#[tokio::test]
async fn test_non_fatal_failure_does_not_end_run() {
    let runner = hidden_runner();

    let optional = runner
        .task("Optional")
        .non_fatal()
        .spawn((), |_, ()| async { Err::<u32, _>(anyhow::anyhow!("not available")) });

    let failure = optional.result().await.unwrap_err();
    assert_eq!(failure.task.as_ref(), "Optional");
    assert_eq!(failure.message.as_ref(), "not available");
    assert_eq!(optional.state(), TaskState::Error);

    let result = runner.run(async { Ok(5) }).await.unwrap();
    assert_eq!(result, 5);
    assert!(runner.fatal_error().is_none());
}

#[tokio::test]
async fn test_dependency_failure_fails_dependent_without_escalating() {
    let runner = hidden_runner();

    let root_cause = runner
        .task("Listing assets")
        .non_fatal()
        .spawn((), |_, ()| async { Err::<Vec<u8>, _>(anyhow::anyhow!("disk gone")) });
    let dependent = runner.schedule("Verifying", root_cause, |scope, assets| async move {
        scope.started();
        Ok(assets.len())
    });

    let failure = dependent.result().await.unwrap_err();
    assert_eq!(failure.task.as_ref(), "Verifying");
    assert!(failure.message.contains("dependency failed"));
    assert_eq!(dependent.state(), TaskState::Error);
    assert!(runner.fatal_error().is_none());
}

#[tokio::test]
async fn test_dependency_failure_reports_original_task() {
    let runner = hidden_runner();

    let listing = runner.schedule("Listing assets", (), |_, ()| async {
        Err::<Vec<u8>, _>(anyhow::anyhow!("relation \"assets\" does not exist"))
    });
    let verify = runner.schedule("Verifying", listing, |_, assets| async move {
        Ok(assets.len())
    });

    let fatal = runner.run(async move { Ok(*verify.await?) }).await.unwrap_err();
    assert_eq!(fatal.task, "Listing assets");
}

#[tokio::test]
async fn test_panicking_task_is_fatal() {
    let runner = hidden_runner();

    let _panicking = runner.schedule("Panicking", (), |_, ()| async {
        if true {
            panic!("worker exploded");
        }
        Ok(())
    });

    let fatal = runner
        .run(async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(())
        })
        .await
        .unwrap_err();

    assert_eq!(fatal.task, "Panicking");
    assert!(fatal.details.contains("worker exploded"));
}

#[tokio::test]
async fn test_root_error_without_task() {
    let runner = hidden_runner();

    let fatal = runner
        .run(async { Err::<(), _>(anyhow::anyhow!("invalid range")) })
        .await
        .unwrap_err();

    assert_eq!(fatal.task, "main");
    assert_eq!(fatal.details, "invalid range");
}

#[tokio::test]
async fn test_debug_keeps_trace() {
    let runner = TaskRunner::new(RunnerOptions {
        show_progress: false,
        debug: true,
        grace_period: Duration::from_millis(1),
        ..RunnerOptions::default()
    });

    let failing = runner.schedule("Hashing", (), |_, ()| async {
        Err::<(), _>(anyhow::anyhow!("permission denied").context("Reading a.jpg"))
    });

    let fatal = runner.run(async move { Ok(*failing.await?) }).await.unwrap_err();
    let trace = fatal.trace.unwrap();
    assert!(trace.contains("Reading a.jpg"));
    assert!(trace.contains("permission denied"));
}

#[tokio::test]
async fn test_state_moves_through_running() {
    let runner = hidden_runner();
    let (release, wait) = tokio::sync::oneshot::channel::<()>();
    let (started_tx, started_rx) = tokio::sync::oneshot::channel::<()>();

    let task = runner.schedule("Blocking", (), |scope, ()| async move {
        scope.started();
        let _ = started_tx.send(());
        let _ = wait.await;
        Ok(())
    });

    started_rx.await.unwrap();
    assert_eq!(task.state(), TaskState::Running);

    release.send(()).unwrap();
    task.result().await.unwrap();
    assert_eq!(task.state(), TaskState::Completed);
}
