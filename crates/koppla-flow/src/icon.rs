//! Display icon resolution for steps and integrations.
//!
//! Connection icons live outside the document, so resolving them is
//! delegated to an [`IconProvider`] supplied by the caller. Extension
//! and kind icons are derived from the document itself.

use crate::document::{Connection, Extension, FlowId, Integration, Step, StepKind};

/// Resolves icons for connection-backed steps.
pub trait IconProvider {
    /// Returns a resolvable icon URL for the connection.
    fn connection_icon(&self, connection: &Connection) -> String;
}

/// Returns the extension's icon, or an empty string when it has none.
pub fn extension_icon(extension: &Extension) -> String {
    extension.icon.clone().unwrap_or_default()
}

/// Returns the generic icon path for a step kind. Kindless steps get
/// the plain step icon.
pub fn step_kind_icon(kind: Option<&StepKind>) -> String {
    let tag = kind.map_or("step", StepKind::as_str);
    format!("/icons/steps/{tag}.svg")
}

impl Step {
    /// Returns the display icon for the step.
    ///
    /// A connection-backed step asks the provider, an extension step
    /// uses the extension's icon, anything else falls back to the
    /// generic icon for its kind.
    pub fn icon(&self, icons: &dyn IconProvider) -> String {
        if let Some(connection) = self.connection.as_ref() {
            return icons.connection_icon(connection);
        }
        if let Some(extension) = self.extension.as_ref() {
            return extension_icon(extension);
        }
        step_kind_icon(self.kind.as_ref())
    }
}

impl Integration {
    /// Returns the icon for the step at the given position of the
    /// flow.
    pub fn step_icon(
        &self,
        icons: &dyn IconProvider,
        flow_id: &FlowId,
        position: usize,
    ) -> Option<String> {
        Some(self.step(flow_id, position)?.icon(icons))
    }

    /// Returns the icon representing the integration's starting step.
    ///
    /// Reads the first flow, as overview cards do.
    pub fn start_icon(&self, icons: &dyn IconProvider) -> Option<String> {
        let flow_id = self.flows.first()?.id.as_ref()?;
        self.step_icon(icons, flow_id, 0)
    }

    /// Returns the icon representing the integration's final step.
    pub fn finish_icon(&self, icons: &dyn IconProvider) -> Option<String> {
        let flow = self.flows.first()?;
        let flow_id = flow.id.as_ref()?;
        let position = flow.steps.as_ref()?.len().checked_sub(1)?;
        self.step_icon(icons, flow_id, position)
    }
}
