/// Runs `f`, logging how long it took when the `metrics` feature is enabled.
#[cfg(feature = "metrics")]
pub fn measure<T>(label: &str, f: impl FnOnce() -> T) -> T {
    let tt = std::time::Instant::now();
    let out = f();

    log::info!("{label}: {}", humantime::format_duration(tt.elapsed()));

    out
}

#[cfg(not(feature = "metrics"))]
#[inline(always)]
pub fn measure<T>(_label: &str, f: impl FnOnce() -> T) -> T {
    f()
}
