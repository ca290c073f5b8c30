//! Regression test parameters and checks

/// Regression test mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegTestMode {
    /// Compare computed values with expectations (default)
    #[default]
    Compare,
    /// Also print every checked value
    Display,
}

impl RegTestMode {
    /// Parse mode from the `REGTEST_MODE` environment variable
    pub fn from_env() -> Self {
        match std::env::var("REGTEST_MODE") {
            Ok(v) if v.eq_ignore_ascii_case("display") => Self::Display,
            _ => Self::Compare,
        }
    }
}

/// State of one regression test run.
///
/// Every `compare_*` call is one numbered check. Failures are recorded and
/// the run continues, so a single `cleanup()` at the end reports all of them.
pub struct RegParams {
    /// Name of the test (e.g., "features")
    pub test_name: String,
    /// Test mode
    pub mode: RegTestMode,
    index: usize,
    failures: Vec<String>,
}

impl RegParams {
    /// Start a regression test named `test_name`.
    pub fn new(test_name: &str) -> Self {
        let mode = RegTestMode::from_env();
        eprintln!();
        eprintln!("==== {}_reg ({:?}) ====", test_name, mode);
        Self {
            test_name: test_name.to_string(),
            mode,
            index: 0,
            failures: Vec::new(),
        }
    }

    /// Number of checks run so far
    pub fn index(&self) -> usize {
        self.index
    }

    /// Check if in display mode
    pub fn display(&self) -> bool {
        self.mode == RegTestMode::Display
    }

    /// Check that `actual` is within `delta` of `expected`.
    ///
    /// NaN never matches.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        let diff = (expected - actual).abs();
        self.check(diff <= delta, || {
            format!("expected {expected}, got {actual} (difference {diff}, allowed {delta})")
        })
    }

    /// Check that `actual` lies in the closed range `[low, high]`.
    pub fn compare_range(&mut self, low: f64, high: f64, actual: f64) -> bool {
        self.check(low <= actual && actual <= high, || {
            format!("{actual} not in [{low}, {high}]")
        })
    }

    /// Check a boolean property.
    pub fn compare_flag(&mut self, expected: bool, actual: bool) -> bool {
        self.check(expected == actual, || format!("expected {expected}, got {actual}"))
    }

    /// Check that two byte strings (labels, serialized values) are identical.
    pub fn compare_strings(&mut self, expected: &[u8], actual: &[u8]) -> bool {
        self.check(expected == actual, || {
            format!(
                "expected {:?}, got {:?}",
                String::from_utf8_lossy(expected),
                String::from_utf8_lossy(actual)
            )
        })
    }

    fn check(&mut self, ok: bool, describe: impl FnOnce() -> String) -> bool {
        self.index += 1;
        if ok {
            if self.display() {
                eprintln!("  [{:02}] ok", self.index);
            }
            return true;
        }
        let msg = format!(
            "Failure in {}_reg, check {}: {}",
            self.test_name,
            self.index,
            describe()
        );
        eprintln!("{}", msg);
        self.failures.push(msg);
        false
    }

    /// Report the run; `true` when every check passed.
    pub fn cleanup(self) -> bool {
        if self.failures.is_empty() {
            eprintln!("SUCCESS: {}_reg ({} checks)", self.test_name, self.index);
            return true;
        }
        eprintln!(
            "FAILURE: {}_reg ({} of {} checks failed)",
            self.test_name,
            self.failures.len(),
            self.index
        );
        for failure in &self.failures {
            eprintln!("  {}", failure);
        }
        false
    }

    /// Check if all checks have passed so far
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Recorded failure messages
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}
