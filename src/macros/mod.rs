/// Takes the owned value out of a `Cow`, or evaluates `$default` when the
/// `Cow` is borrowed.
///
/// Formatting and normalisation helpers return `Cow::Borrowed` when they
/// left their input untouched. Callers that already own that input pass it
/// as `$default`, so an unchanged value is moved instead of copied.
macro_rules! owned_from_cow_or {
    ($getcow:expr, $default:expr) => {{
        match $getcow {
            std::borrow::Cow::Owned(owned) => owned,
            std::borrow::Cow::Borrowed(_) => $default,
        }
    }};
}

pub(crate) use owned_from_cow_or;
