/// Lifts a decoded legacy record one format step forward.
///
/// Legacy shapes live in their own types so the live model never carries
/// optional "maybe old" fields. A loader decodes into the shape matching the
/// stream's [`super::FormatVersion`] and migrates until it reaches the
/// current type.
pub trait Migrate {
    type Next;

    fn migrate(self) -> Self::Next;
}
