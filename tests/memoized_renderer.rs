use chrono::NaiveDate;
use forecast_charts::charts::{
    build_prediction_view, build_split_view, CacheKey, ChannelProgress, FigureCache, MemoizedRenderer, NoProgress,
    ProgressMessage, ProgressSink,
};
use forecast_charts::error::ChartError;
use forecast_charts::types::PriceSeries;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::channel;
use std::sync::Arc;

fn series(days: u32) -> PriceSeries {
    PriceSeries::from_dates(
        (1..=days).map(|d| (NaiveDate::from_ymd_opt(2020, 1, d).unwrap(), 100.0 + d as f64)),
    )
    .unwrap()
}

fn counting_renderer(cache: Arc<FigureCache>) -> (MemoizedRenderer, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let renderer = MemoizedRenderer::memoize(
        "split_view",
        move |train: &PriceSeries, test: &PriceSeries| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(build_split_view(train, test))
        },
        "Plotting train and test sets...",
        cache,
    );
    (renderer, calls)
}

#[derive(Default)]
struct RecordingProgress {
    messages: Vec<String>,
    finished: usize,
}

impl ProgressSink for RecordingProgress {
    fn begin(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }

    fn finish(&mut self) {
        self.finished += 1;
    }
}

#[test]
fn test_equal_arguments_build_once() {
    let (renderer, calls) = counting_renderer(Arc::new(FigureCache::unbounded()));

    let first = renderer.render(&series(3), &series(1), &mut NoProgress).unwrap();
    // Structurally equal, separately allocated inputs
    let second = renderer.render(&series(3), &series(1), &mut NoProgress).unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(first, second);
}

#[test]
fn test_changed_arguments_rebuild() {
    let (renderer, calls) = counting_renderer(Arc::new(FigureCache::unbounded()));

    let short = renderer.render(&series(3), &series(1), &mut NoProgress).unwrap();
    let longer = renderer.render(&series(4), &series(1), &mut NoProgress).unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(short.trace("Training").unwrap().points().len(), 3);
    assert_eq!(longer.trace("Training").unwrap().points().len(), 4);
}

#[test]
fn test_progress_only_on_miss() {
    let (renderer, _) = counting_renderer(Arc::new(FigureCache::unbounded()));
    let mut progress = RecordingProgress::default();

    renderer.render(&series(2), &series(2), &mut progress).unwrap();
    renderer.render(&series(2), &series(2), &mut progress).unwrap();

    assert_eq!(progress.messages, vec!["Plotting train and test sets...".to_string()]);
    assert_eq!(progress.finished, 1);
}

#[test]
fn test_channel_progress_reports_miss() {
    let (renderer, _) = counting_renderer(Arc::new(FigureCache::unbounded()));
    let (tx, rx) = channel();
    let mut progress = ChannelProgress::new(tx);

    renderer.render(&series(2), &series(1), &mut progress).unwrap();
    renderer.render(&series(2), &series(1), &mut progress).unwrap();
    drop(progress);

    let messages: Vec<ProgressMessage> = rx.iter().collect();
    assert_eq!(
        messages,
        vec![
            ProgressMessage::Started("Plotting train and test sets...".to_string()),
            ProgressMessage::Finished,
        ]
    );
}

#[test]
fn test_failure_is_not_cached() {
    let cache = Arc::new(FigureCache::unbounded());
    let attempts = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&attempts);
    let renderer = MemoizedRenderer::memoize(
        "flaky_view",
        move |train: &PriceSeries, test: &PriceSeries| {
            if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(ChartError::MissingColumn {
                    role: "value".to_string(),
                    tried: vec!["Adj Close".to_string()],
                })
            } else {
                Ok(build_split_view(train, test))
            }
        },
        "working",
        Arc::clone(&cache),
    );
    let mut progress = RecordingProgress::default();

    let err = renderer.render(&series(2), &series(1), &mut progress).unwrap_err();
    assert!(matches!(err, ChartError::MissingColumn { .. }));
    assert!(cache.is_empty());
    assert_eq!(progress.finished, 1);

    renderer.render(&series(2), &series(1), &mut progress).unwrap();
    assert_eq!(attempts.load(Ordering::SeqCst), 2);
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_eviction_forces_rebuild() {
    let (renderer, calls) = counting_renderer(Arc::new(FigureCache::new(1)));

    renderer.render(&series(1), &series(1), &mut NoProgress).unwrap();
    renderer.render(&series(2), &series(1), &mut NoProgress).unwrap();
    renderer.render(&series(1), &series(1), &mut NoProgress).unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[test]
fn test_unkeyable_arguments_surface_cache_error() {
    use std::collections::HashMap;

    // JSON object keys must be strings
    let mut args = HashMap::new();
    args.insert((1, 2), "x");
    let err = CacheKey::for_args("op", &args).unwrap_err();
    assert!(matches!(err, ChartError::Cache(_)));
}

#[test]
fn test_concurrent_renders_with_different_keys() {
    let cache = Arc::new(FigureCache::unbounded());
    let handles: Vec<_> = (1..=4u32)
        .map(|n| {
            let cache = Arc::clone(&cache);
            std::thread::spawn(move || {
                let renderer = MemoizedRenderer::split_view("plotting", cache);
                renderer.render(&series(n), &series(1), &mut NoProgress).unwrap()
            })
        })
        .collect();

    for (n, handle) in handles.into_iter().enumerate() {
        let chart = handle.join().unwrap();
        assert_eq!(chart.trace("Training").unwrap().points().len(), n + 1);
    }
    assert_eq!(cache.len(), 4);
}

fn single(value: f64) -> forecast_charts::error::Result<PriceSeries> {
    PriceSeries::from_dates([(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(), value)])
}

#[test]
fn test_non_finite_values_never_reach_the_cache() {
    let (renderer, calls) = counting_renderer(Arc::new(FigureCache::unbounded()));
    renderer.render(&single(1.0).unwrap(), &series(1), &mut NoProgress).unwrap();

    // JSON writes all three as null; they must be refused before keying
    for value in [f64::INFINITY, f64::NEG_INFINITY, f64::NAN] {
        let err = single(value).unwrap_err();
        assert!(matches!(err, ChartError::Validation(_)));
    }
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_negative_zero_hits_zero_entry() {
    let cache = Arc::new(FigureCache::unbounded());
    let (renderer, calls) = counting_renderer(Arc::clone(&cache));

    let zero = renderer.render(&single(0.0).unwrap(), &series(1), &mut NoProgress).unwrap();
    let negative = renderer.render(&single(-0.0).unwrap(), &series(1), &mut NoProgress).unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(Arc::ptr_eq(&zero, &negative));
    assert_eq!(cache.stats().hits, 1);
}

#[test]
fn test_same_name_different_builders_do_not_collide() {
    let cache = Arc::new(FigureCache::unbounded());
    let split = MemoizedRenderer::memoize(
        "view",
        |a: &PriceSeries, b: &PriceSeries| Ok(build_split_view(a, b)),
        "working",
        Arc::clone(&cache),
    );
    let prediction = MemoizedRenderer::memoize(
        "view",
        |a: &PriceSeries, b: &PriceSeries| Ok(build_prediction_view(a, b)),
        "working",
        Arc::clone(&cache),
    );

    let s = split.render(&series(2), &series(1), &mut NoProgress).unwrap();
    let p = prediction.render(&series(2), &series(1), &mut NoProgress).unwrap();

    assert_eq!(s.traces()[0].name(), "Training");
    assert_eq!(p.traces()[1].name(), "Predicted");
    assert_eq!(cache.len(), 2);
}
