use serde::{Deserialize, Serialize};

/// Urgency tag attached to alerts via [`PriorityAlert`], ordered from
/// lowest to highest.
///
/// # Examples
///
/// ```
/// use wardmon_common::alert::Priority;
///
/// let p: Priority = "critical".parse().unwrap();
/// assert_eq!(p, Priority::Critical);
/// assert_eq!(p.to_string(), "CRITICAL");
/// assert!(Priority::Critical > Priority::Low);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::Low => write!(f, "LOW"),
            Priority::Medium => write!(f, "MEDIUM"),
            Priority::High => write!(f, "HIGH"),
            Priority::Critical => write!(f, "CRITICAL"),
        }
    }
}

impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            "critical" => Ok(Priority::Critical),
            _ => Err(format!("unknown priority: {s}")),
        }
    }
}

/// An alert produced by one rule evaluation: patient, human-readable
/// condition, and when the triggering data was observed.
///
/// The triple is immutable once created. Display metadata is layered on
/// top through the annotation wrappers rather than by mutation, so the
/// inner alert always stays valid on its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub patient_id: String,
    pub condition: String,
    pub timestamp_ms: i64,
}

impl Alert {
    pub fn new(
        patient_id: impl Into<String>,
        condition: impl Into<String>,
        timestamp_ms: i64,
    ) -> Self {
        Self {
            patient_id: patient_id.into(),
            condition: condition.into(),
            timestamp_ms,
        }
    }
}

/// Read-only view over an alert, implemented by [`Alert`] itself and by
/// every annotation wrapper.
///
/// Wrappers override only the rendered condition and delegate the rest
/// inward, so annotations compose in any order. [`AlertView::flatten`]
/// materializes the rendered view as a plain [`Alert`], which is what
/// delivery sinks exchange.
pub trait AlertView {
    fn patient_id(&self) -> &str;

    /// The rendered condition text, including any annotation decoration.
    fn condition(&self) -> String;

    fn timestamp_ms(&self) -> i64;

    /// Collapse this view into a plain alert carrying the rendered
    /// condition.
    fn flatten(&self) -> Alert {
        Alert {
            patient_id: self.patient_id().to_string(),
            condition: self.condition(),
            timestamp_ms: self.timestamp_ms(),
        }
    }
}

impl AlertView for Alert {
    fn patient_id(&self) -> &str {
        &self.patient_id
    }

    fn condition(&self) -> String {
        self.condition.clone()
    }

    fn timestamp_ms(&self) -> i64 {
        self.timestamp_ms
    }
}

/// Annotation prefixing the rendered condition with a bracketed priority
/// tag (`"[HIGH PRIORITY] …"`). Patient id and timestamp pass through
/// unchanged; the tag itself is queryable via [`PriorityAlert::priority`].
#[derive(Debug, Clone)]
pub struct PriorityAlert<A> {
    inner: A,
    priority: Priority,
}

impl<A: AlertView> PriorityAlert<A> {
    pub fn new(inner: A, priority: Priority) -> Self {
        Self { inner, priority }
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn inner(&self) -> &A {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut A {
        &mut self.inner
    }

    pub fn into_inner(self) -> A {
        self.inner
    }
}

impl<A: AlertView> AlertView for PriorityAlert<A> {
    fn patient_id(&self) -> &str {
        self.inner.patient_id()
    }

    fn condition(&self) -> String {
        format!("[{} PRIORITY] {}", self.priority, self.inner.condition())
    }

    fn timestamp_ms(&self) -> i64 {
        self.inner.timestamp_ms()
    }
}

/// Annotation for conditions that should be re-announced until resolved:
/// a repeat interval, a repeat budget, and the counter state that tracks
/// consumption.
///
/// This is the one deliberate island of mutable state in the alert model,
/// confined to the annotation instance; the wrapped alert itself is never
/// modified. The rendered condition carries the number of repeats already
/// consumed (`" [REPEATED 2x]"`).
#[derive(Debug, Clone)]
pub struct RepeatingAlert<A> {
    inner: A,
    interval_ms: i64,
    max_repeats: u32,
    count: u32,
    last_trigger_ms: i64,
}

impl<A: AlertView> RepeatingAlert<A> {
    /// Counter and last-trigger time start at zero, so the first
    /// [`should_repeat`](Self::should_repeat) call succeeds immediately
    /// for any epoch-scale `now_ms`.
    pub fn new(inner: A, interval_ms: i64, max_repeats: u32) -> Self {
        Self {
            inner,
            interval_ms,
            max_repeats,
            count: 0,
            last_trigger_ms: 0,
        }
    }

    /// Returns true, advancing the counter and last-trigger time, only
    /// when the interval has elapsed since the last trigger and the
    /// repeat budget is not exhausted.
    pub fn should_repeat(&mut self, now_ms: i64) -> bool {
        if now_ms - self.last_trigger_ms >= self.interval_ms && self.count < self.max_repeats {
            self.last_trigger_ms = now_ms;
            self.count += 1;
            true
        } else {
            false
        }
    }

    /// Number of repeats consumed so far.
    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn is_exhausted(&self) -> bool {
        self.count >= self.max_repeats
    }

    pub fn inner(&self) -> &A {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut A {
        &mut self.inner
    }

    pub fn into_inner(self) -> A {
        self.inner
    }
}

impl<A: AlertView> AlertView for RepeatingAlert<A> {
    fn patient_id(&self) -> &str {
        self.inner.patient_id()
    }

    fn condition(&self) -> String {
        format!("{} [REPEATED {}x]", self.inner.condition(), self.count)
    }

    fn timestamp_ms(&self) -> i64 {
        self.inner.timestamp_ms()
    }
}
