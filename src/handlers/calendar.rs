//! Academic calendar handler

use super::invalid_params;
use crate::AcadflowServerHandler;
use crate::academic::{CalendarMonth, layout_month, month_agenda};
use crate::formatting;
use mcp_attr::Result as McpResult;

impl AcadflowServerHandler {
    /// Lays out the 6-week grid of `month` (YYYY-MM, default: the current month)
    /// and lists the events starting in it.
    pub async fn handle_calendar(&self, month: Option<String>) -> McpResult<String> {
        let month = match month.as_deref().map(str::trim).filter(|m| !m.is_empty()) {
            Some(month_str) => month_str
                .parse::<CalendarMonth>()
                .map_err(invalid_params)?,
            None => CalendarMonth::containing(self.today),
        };

        let events = &self.reference.events;
        let layout = layout_month(month, events, self.today);
        let agenda = month_agenda(month, events);
        Ok(formatting::format_calendar(month, &layout, &agenda, self.today))
    }
}
