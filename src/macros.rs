//! Macros for code generation in MRZ record types.
//!
//! Records keep their fields private so that they can only be produced by
//! decoding or by a builder. These macros generate the read-only accessors.

/// Macro to generate read-only accessor methods for struct fields.
///
/// Two forms are accepted:
/// - `ref name: Type` generates `fn name(&self) -> &Type`
/// - `copy name: Type` generates `fn name(&self) -> Type` for `Copy` fields
///
/// Every generated method is marked `#[must_use]`.
///
/// # Example
///
/// ```ignore
/// pub struct MyRecord {
///     surname: String,
///     valid: bool,
/// }
///
/// impl MyRecord {
///     define_getters!(ref surname: str);
///     define_getters!(copy valid: bool);
/// }
/// ```
#[macro_export]
macro_rules! define_getters {
    (ref $($name:ident: $ty:ty),+ $(,)?) => {
        $(
            #[doc = concat!("Returns the `", stringify!($name), "` field.")]
            #[must_use]
            pub fn $name(&self) -> &$ty {
                &self.$name
            }
        )+
    };
    (copy $($name:ident: $ty:ty),+ $(,)?) => {
        $(
            #[doc = concat!("Returns the `", stringify!($name), "` field.")]
            #[must_use]
            pub fn $name(&self) -> $ty {
                self.$name
            }
        )+
    };
}
