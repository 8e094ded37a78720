//! PowerConnect model family classification by sysObjectID

use std::fmt;

use crate::tables::{DNOS_CPU_LOAD_OID, FASTPATH_CPU_LOAD_OID};

/// Enterprise subtree all PowerConnect sysObjectIDs live under
const DELL_NETWORKING_PREFIX: &str = ".1.3.6.1.4.1.674.10895.";

/// Models running the Radlan based 55xx firmware
const NV55XX_MODELS: &[&str] = &["3020", "3021", "3028", "3030", "3031"];

/// Models running DNOS
const DNOS_MODELS: &[&str] = &[
    "3024", "3042", "3053", "3054", "3056", "3058", "3065", "3046", "3063", "3064", "3066",
    "3078", "3079", "3080", "3081", "3082", "3083",
];

/// How processors are discovered and polled on a device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PowerConnectVariant {
    /// 55xx family: one CPU utilization scalar
    Nv55xx,
    /// DNOS: CPU load string under the DNOS root
    Dnos,
    /// Everything else: CPU load string under the FASTPATH root
    Fastpath,
}

impl PowerConnectVariant {
    /// Classifies a device by its sysObjectID.
    ///
    /// Matching is a plain prefix test in family order, so a sysObjectID
    /// with extra arcs after the model number still matches its family.
    /// Unknown values fall back to [`PowerConnectVariant::Fastpath`].
    pub fn classify(sys_object_id: &str) -> Self {
        if matches_any(sys_object_id, NV55XX_MODELS) {
            PowerConnectVariant::Nv55xx
        } else if matches_any(sys_object_id, DNOS_MODELS) {
            PowerConnectVariant::Dnos
        } else {
            PowerConnectVariant::Fastpath
        }
    }

    /// Root of the CPU load table, `None` for the scalar family
    pub fn cpu_load_root(&self) -> Option<&'static str> {
        match self {
            PowerConnectVariant::Nv55xx => None,
            PowerConnectVariant::Dnos => Some(DNOS_CPU_LOAD_OID),
            PowerConnectVariant::Fastpath => Some(FASTPATH_CPU_LOAD_OID),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PowerConnectVariant::Nv55xx => "nv55xx",
            PowerConnectVariant::Dnos => "dnos",
            PowerConnectVariant::Fastpath => "fastpath",
        }
    }
}

impl fmt::Display for PowerConnectVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn matches_any(sys_object_id: &str, models: &[&str]) -> bool {
    sys_object_id
        .strip_prefix(DELL_NETWORKING_PREFIX)
        .is_some_and(|rest| models.iter().any(|model| rest.starts_with(model)))
}
