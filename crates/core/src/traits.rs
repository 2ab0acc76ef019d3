/// Common surface of color and geometry handlers.
///
/// Capability is fixed at construction. `extract` on an incapable handler
/// returns `None` without touching the cloud.
pub trait AttributeHandler {
    type Output;

    /// Short label of the handler variant.
    fn name(&self) -> &str;

    /// Field (or field group) the handler reads, for display.
    fn field_name(&self) -> &str;

    fn is_capable(&self) -> bool;

    fn extract(&self) -> Option<Self::Output>;
}
