/* Trace macros expand to nothing unless the `render_trace` feature is
 * enabled, in which case they forward to `log::trace!`.  The nop function
 * keeps the no-op arms from tripping clippy's empty-macro lints.
 */
#[cfg(not(feature = "render_trace"))]
#[inline(always)]
pub fn nop() {}

#[cfg(feature = "render_trace")]
#[macro_export]
#[doc(hidden)]
macro_rules! md_trace {
    ($fmt:expr) => {
        ::log::trace!($fmt);
    };
    ($fmt:expr, $( $args:expr ),*) => {
        ::log::trace!($fmt, $( $args ),*);
    };
}
#[cfg(not(feature = "render_trace"))]
#[macro_export]
#[doc(hidden)]
macro_rules! md_trace {
    ($fmt:expr) => {
        $crate::macros::nop();
    };
    ($fmt:expr, $( $args:expr ),*) => {{
        $crate::macros::nop();
        let _ = ($( &$args ),*);
    }};
}
