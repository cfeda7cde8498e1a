//! Controller/follower role resolution

use crate::AnalogInput;

const ROLE_NAME_CONTROLLER: &str = "controller";
const ROLE_NAME_FOLLOWER: &str = "follower";

/// Part a node plays on the bus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRole {
    /// Samples the analog inputs and drives the bus
    Controller,
    /// Only consumes bus events and renders them
    Follower,
}

impl NodeRole {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Controller => ROLE_NAME_CONTROLLER,
            Self::Follower => ROLE_NAME_FOLLOWER,
        }
    }
}

/// How the role is chosen at configuration load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoleSelection {
    /// Controller when a healthy analog converter is attached
    #[default]
    Auto,
    ForceController,
    ForceFollower,
}

/// Decide the node role from the selection and the attached converter
///
/// A converter that reports itself disconnected counts as absent. Forcing
/// the controller role without a usable converter falls back to follower.
pub fn resolve_role<A: AnalogInput>(selection: RoleSelection, adc: Option<&mut A>) -> NodeRole {
    let healthy = adc.is_some_and(|adc| !adc.is_disconnected());

    match selection {
        RoleSelection::Auto if healthy => {
            log!("strip: analog converter found, configured as CONTROLLER");
            NodeRole::Controller
        }
        RoleSelection::Auto => {
            log!("strip: no analog converter, configured as FOLLOWER");
            NodeRole::Follower
        }
        RoleSelection::ForceController if healthy => NodeRole::Controller,
        RoleSelection::ForceController => {
            log!("strip: controller role forced without analog converter, using FOLLOWER");
            NodeRole::Follower
        }
        RoleSelection::ForceFollower => NodeRole::Follower,
    }
}
