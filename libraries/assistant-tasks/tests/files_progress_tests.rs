//! Files progress fan-out: ordering, accounting and bounded concurrency

use assistant_tasks::{RunnerOptions, TaskError, TaskRunner};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

fn hidden_runner(concurrency: usize) -> TaskRunner {
    TaskRunner::new(RunnerOptions {
        show_progress: false,
        concurrency,
        ..RunnerOptions::default()
    })
}

#[tokio::test]
async fn test_results_keep_input_order() {
    let runner = hidden_runner(4);
    let items: Vec<u64> = (0..40).collect();
    let progress = runner.files_progress(items.len(), None);

    let results = progress
        .process(items.clone(), |_| 1, |n| {
            // later items finish first
            std::thread::sleep(Duration::from_millis(40 - n));
            n * 2
        })
        .await
        .unwrap();

    let expected: Vec<u64> = items.iter().map(|n| n * 2).collect();
    assert_eq!(results, expected);
}

#[tokio::test]
async fn test_byte_weighted_advance() {
    let runner = hidden_runner(3);
    let sizes: Vec<u64> = vec![10, 0, 4096, 7, 123_456];
    let total: u64 = sizes.iter().sum();
    let progress = runner.files_progress(sizes.len(), Some(total));

    progress.process(sizes.clone(), |size| *size, |size| size).await.unwrap();

    assert_eq!(progress.position(), total);
    assert_eq!(progress.processed(), sizes.len() as u64);
}

#[tokio::test]
async fn test_count_weighted_advance() {
    let runner = hidden_runner(2);
    let progress = runner.files_progress(25, None);

    progress
        .process((0..25).collect(), |_: &u32| 1_000, |n| n)
        .await
        .unwrap();

    assert_eq!(progress.position(), 25);
    assert_eq!(progress.processed(), 25);
}

#[tokio::test]
async fn test_empty_input() {
    let runner = hidden_runner(2);
    let progress = runner.files_progress(0, Some(0));

    let results: Vec<u8> = progress.process(Vec::<u8>::new(), |_| 0, |n| n).await.unwrap();

    assert!(results.is_empty());
    assert_eq!(progress.processed(), 0);
}

#[tokio::test]
async fn test_concurrency_is_bounded() {
    let runner = hidden_runner(2);
    let in_flight = Arc::new(AtomicUsize::new(0));
    let peak = Arc::new(AtomicUsize::new(0));
    let progress = runner.files_progress(12, None);

    let worker_in_flight = Arc::clone(&in_flight);
    let worker_peak = Arc::clone(&peak);
    progress
        .process((0..12).collect::<Vec<u32>>(), |_| 1, move |_| {
            let now = worker_in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            worker_peak.fetch_max(now, Ordering::SeqCst);
            std::thread::sleep(Duration::from_millis(15));
            worker_in_flight.fetch_sub(1, Ordering::SeqCst);
        })
        .await
        .unwrap();

    assert!(peak.load(Ordering::SeqCst) <= 2);
    assert!(peak.load(Ordering::SeqCst) >= 1);
}

#[tokio::test]
async fn test_panicking_worker_is_reported() {
    let runner = hidden_runner(2);
    let progress = runner.files_progress(3, None);

    let result = progress
        .process(vec![1, 2, 3], |_| 1, |n: i32| {
            assert!(n != 2, "unreadable file");
            n
        })
        .await;

    assert!(matches!(result, Err(TaskError::Worker(_))));
}

#[tokio::test]
async fn test_files_progress_inside_task() {
    let runner = hidden_runner(4);

    let checked = runner.schedule("Checking", (), |scope, ()| async move {
        scope.started();
        let progress = scope.files_progress(5, None);
        progress.set_label("Checking files");
        let lengths = progress
            .process(vec!["a", "bb", "ccc", "dddd", "eeeee"], |_| 1, |s| s.len())
            .await?;
        Ok(lengths)
    });

    let lengths = runner.run(async move { Ok(checked.await?) }).await.unwrap();
    assert_eq!(*lengths, vec![1, 2, 3, 4, 5]);
}
