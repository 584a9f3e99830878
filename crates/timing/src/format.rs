//! Locale-free duration formatting.

/// Format a millisecond duration using progressively larger units.
///
/// Values below one second render as `"{n} ms"`; below one minute as
/// `"{s} s"` with a millisecond tail when the remainder is non-zero;
/// anything larger as `"{m} min"` with second and millisecond tails when
/// non-zero. The output is lossless at millisecond granularity.
pub fn format_duration_ms(ms: u64) -> String {
    if ms < 1_000 {
        return format!("{ms} ms");
    }

    if ms < 60_000 {
        let seconds = ms / 1_000;
        let remainder = ms % 1_000;
        return if remainder == 0 {
            format!("{seconds} s")
        } else {
            format!("{seconds} s {remainder} ms")
        };
    }

    let minutes = ms / 60_000;
    let seconds = (ms % 60_000) / 1_000;
    let remainder = ms % 1_000;

    let mut out = format!("{minutes} min");
    if seconds > 0 {
        out.push_str(&format!(" {seconds} s"));
    }
    if remainder > 0 {
        out.push_str(&format!(" {remainder} ms"));
    }
    out
}
