/// Stopwatch display for an elapsed duration in milliseconds: `MM:SS:CC`
/// (minutes mod 60, seconds mod 60, centiseconds mod 100, zero-padded).
/// Pure derived function; the session only exposes the numeric value.
#[inline]
pub fn format_elapsed(ms: u64) -> String {
    let centis = (ms / 10) % 100;
    let seconds = (ms / 1000) % 60;
    let minutes = (ms / 1000 / 60) % 60;
    format!("{minutes:02}:{seconds:02}:{centis:02}")
}
