pub mod keyvec;
pub mod peek;

/// Assert an inline `insta` snapshot, attaching the source text that produced
/// the output as snapshot info.
#[macro_export]
macro_rules! assert_snapshot_with_source {
    ($source:expr => $output:expr, @$snapshot:literal) => {{
        insta::with_settings!({
            info => &$source,
            omit_expression => true,
        }, {
            insta::assert_snapshot!($output, @$snapshot);
        })
    }};
}
