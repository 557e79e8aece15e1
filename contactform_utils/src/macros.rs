/// Asserts that an expression matches a pattern, with an optional guard.
///
/// The expression is matched by reference, so bindings in the pattern are
/// references and the value can still be used afterwards.
#[macro_export]
macro_rules! assert_matches {
    ($expr:expr, $pat:pat $(if $guard:expr)? $(,)?) => {
        match &$expr {
            $pat $(if $guard)? => (),
            val => ::core::panic!(
                "assertion `matches!({}, {})` failed\n  value: {val:?}",
                ::core::stringify!($expr),
                ::core::stringify!($pat $(if $guard)?),
            ),
        }
    };
}
