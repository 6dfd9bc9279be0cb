// ============================================================================
// ACTION VIEWMODEL - Delegated click commands
// ============================================================================
// A clicked element carries `data-action="<name>"` plus the attributes that
// command needs. The table below maps names to parsers.
// ============================================================================

use std::collections::HashMap;

use uuid::Uuid;

use crate::views::ViewId;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Stop(Uuid),
    Acknowledge(i64),
    SimulateMission,
    ResetDemo,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::Stop(_) => "stop",
            Action::Acknowledge(_) => "acknowledge",
            Action::SimulateMission => "simulate",
            Action::ResetDemo => "reset-demo",
        }
    }

    /// Prompt to confirm before running, if the command is destructive
    pub fn confirmation(&self) -> Option<String> {
        match self {
            Action::Stop(id) => Some(format!("Halt convoy {}?", id)),
            Action::ResetDemo => Some("Reset the demonstration environment?".to_string()),
            Action::Acknowledge(_) | Action::SimulateMission => None,
        }
    }

    /// Loader re-run once the command has been posted
    pub fn refreshes(&self) -> ViewId {
        match self {
            Action::Stop(_) => ViewId::Convoys,
            Action::Acknowledge(_) => ViewId::Alerts,
            Action::SimulateMission | Action::ResetDemo => ViewId::Dashboard,
        }
    }
}

/// Read access to a clicked element's `data-*` attributes (`key` without the prefix)
pub trait ActionTarget {
    fn data(&self, key: &str) -> Option<String>;
}

impl ActionTarget for HashMap<String, String> {
    fn data(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

type ActionParser = fn(&dyn ActionTarget) -> Option<Action>;

const ACTION_TABLE: &[(&str, ActionParser)] = &[
    ("stop", parse_stop),
    ("acknowledge", parse_acknowledge),
    ("simulate", parse_simulate),
    ("reset-demo", parse_reset_demo),
];

fn parse_stop(target: &dyn ActionTarget) -> Option<Action> {
    let raw = target.data("convoy-id")?;
    Uuid::parse_str(raw.trim()).ok().map(Action::Stop)
}

fn parse_acknowledge(target: &dyn ActionTarget) -> Option<Action> {
    let raw = target.data("alert-id")?;
    raw.trim().parse().ok().map(Action::Acknowledge)
}

fn parse_simulate(_: &dyn ActionTarget) -> Option<Action> {
    Some(Action::SimulateMission)
}

fn parse_reset_demo(_: &dyn ActionTarget) -> Option<Action> {
    Some(Action::ResetDemo)
}

pub struct ActionViewModel;

impl ActionViewModel {
    /// Resolve a clicked element to a command; `None` for unknown names or bad ids
    pub fn parse(target: &dyn ActionTarget) -> Option<Action> {
        let name = target.data("action")?;
        let (_, parser) = ACTION_TABLE.iter().find(|(known, _)| *known == name)?;
        let action = parser(target);
        if action.is_none() {
            log::warn!("⚠️ Ignoring '{}' action with missing or invalid target id", name);
        }
        action
    }
}
