//! Performance monitoring utilities.
//!
//! Provides timing instrumentation for the hot paths of the crate: event
//! dispatch, solve passes, and canvas rendering.
//!
//! ## Features
//!
//! - **Pass timing**: Track event-to-solve passes with rolling averages
//! - **Scoped timers**: RAII-style timing for code blocks
//! - **Aggregated statistics**: Per-operation timing samples
//! - **Conditional compilation**: Zero-cost when profiling disabled
//!
//! ## Usage
//!
//! Enable profiling with the `profiling` feature flag:
//! ```toml
//! [dependencies]
//! mousenode = { features = ["profiling"] }
//! ```
//!
//! Use the profiling macros for zero-cost instrumentation:
//! ```ignore
//! use mousenode::perf::profile_scope;
//!
//! fn expensive_operation() {
//!     profile_scope!("expensive_operation");
//!     // ... work ...
//! }
//! ```

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Instant;
use tracing::warn;
#[cfg(feature = "profiling")]
use tracing::trace;

// ============================================================================
// Constants
// ============================================================================

/// Target time for one event-to-solve pass; matches a 60 FPS host budget
pub const TARGET_PASS_MS: f64 = 16.67;

/// Number of samples to keep for rolling averages
const SAMPLE_COUNT: usize = 60;

/// Threshold multiplier for warning (e.g., 2.0 = warn if pass takes 2x target)
const WARN_THRESHOLD: f64 = 2.0;

/// Number of samples to keep for operation statistics
const STATS_SAMPLE_COUNT: usize = 100;

/// Global flag to enable/disable profiling at runtime
static PROFILING_ENABLED: AtomicBool = AtomicBool::new(cfg!(feature = "profiling"));

/// Global counter for unique timer IDs
static TIMER_COUNTER: AtomicU64 = AtomicU64::new(0);

// ============================================================================
// Profiling Macros (zero-cost when disabled)
// ============================================================================

/// Profile a scope with the given name. Zero-cost when profiling is disabled.
///
/// # Example
/// ```ignore
/// use mousenode::perf::profile_scope;
///
/// fn solve_pending() {
///     profile_scope!("solve_pending");
///     // ... evaluation code ...
/// }
/// ```
#[macro_export]
macro_rules! profile_scope {
    ($name:expr) => {
        #[cfg(feature = "profiling")]
        let _timer = $crate::perf::ScopedTimer::for_profiling($name);
        #[cfg(not(feature = "profiling"))]
        let _ = $name; // Suppress unused variable warning
    };
    ($name:expr, $threshold_ms:expr) => {
        #[cfg(feature = "profiling")]
        let _timer = $crate::perf::ScopedTimer::new($name, $threshold_ms);
        #[cfg(not(feature = "profiling"))]
        let _ = ($name, $threshold_ms);
    };
}

/// Profile the current function. Zero-cost when profiling is disabled.
#[macro_export]
macro_rules! profile_function {
    () => {
        $crate::profile_scope!(concat!(module_path!(), "::", $crate::function_name!()));
    };
}

/// Helper macro to get function name (requires nightly or workaround)
#[macro_export]
macro_rules! function_name {
    () => {{
        fn f() {}
        fn type_name_of<T>(_: T) -> &'static str {
            std::any::type_name::<T>()
        }
        let name = type_name_of(f);
        // Strip the trailing "::f" from the function name
        &name[..name.len() - 3]
    }};
}

// Re-export macros at crate root
pub use profile_function;
pub use profile_scope;

// ============================================================================
// Runtime Profiling Control
// ============================================================================

/// Enable or disable profiling at runtime.
/// Note: This only affects code compiled with the `profiling` feature.
pub fn set_profiling_enabled(enabled: bool) {
    PROFILING_ENABLED.store(enabled, Ordering::Relaxed);
}

/// Check if profiling is currently enabled.
#[inline]
pub fn is_profiling_enabled() -> bool {
    PROFILING_ENABLED.load(Ordering::Relaxed)
}

// ============================================================================
// Pass Performance Monitor
// ============================================================================

/// Performance monitor for event-to-solve pass times and operation
/// statistics.
pub struct PerfMonitor {
    /// Recent pass times in milliseconds
    pass_times: VecDeque<f64>,
    /// When the current pass started
    pass_start: Option<Instant>,
    /// Count of passes that exceeded the warning threshold
    slow_pass_count: u64,
    /// Total passes tracked
    total_passes: u64,
    /// Per-operation timing statistics
    operation_stats: HashMap<&'static str, OperationStats>,
}

/// Statistics for a specific operation type.
#[derive(Debug, Clone)]
pub struct OperationStats {
    /// Recent timing samples in milliseconds
    samples: VecDeque<f64>,
    /// Total invocation count
    count: u64,
    /// Minimum observed time
    min_ms: f64,
    /// Maximum observed time
    max_ms: f64,
    /// Running sum for average calculation
    sum_ms: f64,
}

impl Default for OperationStats {
    fn default() -> Self {
        Self {
            samples: VecDeque::with_capacity(STATS_SAMPLE_COUNT),
            count: 0,
            min_ms: f64::MAX,
            max_ms: 0.0,
            sum_ms: 0.0,
        }
    }
}

impl OperationStats {
    /// Record a new timing sample.
    pub fn record(&mut self, ms: f64) {
        if self.samples.len() >= STATS_SAMPLE_COUNT {
            if let Some(old) = self.samples.pop_front() {
                self.sum_ms -= old;
            }
        }
        self.samples.push_back(ms);
        self.sum_ms += ms;
        self.count += 1;
        self.min_ms = self.min_ms.min(ms);
        self.max_ms = self.max_ms.max(ms);
    }

    /// Get the average time over recent samples.
    pub fn average(&self) -> f64 {
        if self.samples.is_empty() {
            0.0
        } else {
            self.sum_ms / self.samples.len() as f64
        }
    }

    /// Get the p95 (95th percentile) time.
    pub fn p95(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let mut sorted: Vec<f64> = self.samples.iter().copied().collect();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        let idx = ((sorted.len() as f64) * 0.95).floor() as usize;
        sorted.get(idx.min(sorted.len() - 1)).copied().unwrap_or(0.0)
    }
}

impl Default for PerfMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl PerfMonitor {
    /// Create a new performance monitor.
    pub fn new() -> Self {
        Self {
            pass_times: VecDeque::with_capacity(SAMPLE_COUNT),
            pass_start: None,
            slow_pass_count: 0,
            total_passes: 0,
            operation_stats: HashMap::new(),
        }
    }

    /// Mark the start of an event-to-solve pass.
    pub fn begin_pass(&mut self) {
        self.pass_start = Some(Instant::now());
    }

    /// Mark the end of a pass and record timing.
    /// Returns the pass time in milliseconds.
    pub fn end_pass(&mut self) -> Option<f64> {
        let start = self.pass_start.take()?;
        let ms = start.elapsed().as_secs_f64() * 1000.0;

        if self.pass_times.len() >= SAMPLE_COUNT {
            self.pass_times.pop_front();
        }
        self.pass_times.push_back(ms);
        self.total_passes += 1;

        if ms > TARGET_PASS_MS * WARN_THRESHOLD {
            self.slow_pass_count += 1;
            warn!(
                pass_time_ms = format!("{:.2}", ms),
                target_ms = format!("{:.2}", TARGET_PASS_MS),
                "Slow pass detected"
            );
        }

        Some(ms)
    }

    /// Record an operation timing.
    pub fn record_operation(&mut self, name: &'static str, elapsed_ms: f64) {
        self.operation_stats
            .entry(name)
            .or_default()
            .record(elapsed_ms);
    }

    /// Get the average pass time over recent samples.
    pub fn average_pass_time(&self) -> f64 {
        if self.pass_times.is_empty() {
            return 0.0;
        }
        self.pass_times.iter().sum::<f64>() / self.pass_times.len() as f64
    }

    /// Get the maximum pass time in recent samples.
    pub fn max_pass_time(&self) -> f64 {
        self.pass_times.iter().copied().fold(0.0, f64::max)
    }

    /// Get the percentage of passes that were slow.
    pub fn slow_pass_percentage(&self) -> f64 {
        if self.total_passes == 0 {
            return 0.0;
        }
        (self.slow_pass_count as f64 / self.total_passes as f64) * 100.0
    }

    /// Get statistics for a specific operation.
    pub fn get_operation_stats(&self, name: &str) -> Option<&OperationStats> {
        self.operation_stats.get(name)
    }

    /// Reset all statistics.
    pub fn reset(&mut self) {
        self.pass_times.clear();
        self.pass_start = None;
        self.slow_pass_count = 0;
        self.total_passes = 0;
        self.operation_stats.clear();
    }
}

// ============================================================================
// Scoped Timer
// ============================================================================

/// A scoped timer that logs duration on drop.
pub struct ScopedTimer {
    name: &'static str,
    start: Instant,
    threshold_ms: f64,
    #[allow(dead_code)]
    timer_id: u64,
    #[cfg(feature = "profiling")]
    depth: usize,
}

// Thread-local depth tracking for nested timers
#[cfg(feature = "profiling")]
thread_local! {
    static CURRENT_DEPTH: std::cell::Cell<usize> = const { std::cell::Cell::new(0) };
}

impl ScopedTimer {
    /// Create a new scoped timer with a warning threshold.
    pub fn new(name: &'static str, threshold_ms: f64) -> Self {
        let timer_id = TIMER_COUNTER.fetch_add(1, Ordering::Relaxed);

        #[cfg(feature = "profiling")]
        let depth = CURRENT_DEPTH.with(|d| {
            let current = d.get();
            d.set(current + 1);
            current
        });

        Self {
            name,
            start: Instant::now(),
            threshold_ms,
            timer_id,
            #[cfg(feature = "profiling")]
            depth,
        }
    }

    /// Create a timer with the default threshold (one pass budget).
    pub fn with_default_threshold(name: &'static str) -> Self {
        Self::new(name, TARGET_PASS_MS)
    }

    /// Create a timer for profiling (lower threshold, 1ms).
    pub fn for_profiling(name: &'static str) -> Self {
        Self::new(name, 1.0)
    }

    /// Get elapsed time without stopping the timer.
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }

    /// Get the timer's name.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        let elapsed_ms = self.start.elapsed().as_secs_f64() * 1000.0;

        #[cfg(feature = "profiling")]
        {
            CURRENT_DEPTH.with(|d| d.set(d.get().saturating_sub(1)));

            if elapsed_ms > self.threshold_ms {
                let indent = "  ".repeat(self.depth);
                trace!("{}[PERF] {}: {:.2}ms", indent, self.name, elapsed_ms);
            }
        }

        #[cfg(not(feature = "profiling"))]
        {
            if elapsed_ms > self.threshold_ms {
                warn!(
                    operation = self.name,
                    elapsed_ms = format!("{:.2}", elapsed_ms),
                    threshold_ms = format!("{:.2}", self.threshold_ms),
                    "Slow operation"
                );
            }
        }
    }
}

// ============================================================================
// Timing Utilities
// ============================================================================

/// Measure execution time of a closure and return both the result and
/// elapsed time.
///
/// # Example
/// ```ignore
/// let (result, elapsed_ms) = measure(|| expensive_computation());
/// println!("Computed {} in {:.2}ms", result, elapsed_ms);
/// ```
#[inline]
pub fn measure<T, F: FnOnce() -> T>(f: F) -> (T, f64) {
    let start = Instant::now();
    let result = f();
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
    (result, elapsed_ms)
}

/// Measure execution time and log if it exceeds the threshold.
///
/// # Example
/// ```ignore
/// let result = measure_and_log("render_canvas", 5.0, || document.render_canvas());
/// ```
#[inline]
pub fn measure_and_log<T, F: FnOnce() -> T>(name: &str, threshold_ms: f64, f: F) -> T {
    let (result, elapsed_ms) = measure(f);
    if elapsed_ms > threshold_ms {
        warn!(
            operation = name,
            elapsed_ms = format!("{:.2}", elapsed_ms),
            threshold_ms = format!("{:.2}", threshold_ms),
            "Slow operation"
        );
    }
    result
}
