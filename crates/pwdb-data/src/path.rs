//! Trace the arterial path from the aortic root to a measurement site

use pwdb_core::prelude::*;
use pwdb_core::sites::{self, SiteMap};

use crate::table::ModelSegment;

/// Inlet node of the aortic root; every path starts here
pub const ROOT_NODE: u32 = 1;

/// One segment along a traced path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathStep {
    /// Segment name in the model
    pub site: String,
    /// Signal prefix recorded for the segment, if it is a measurement site
    pub prefix: Option<String>,
}

/// Find the segment measured by `prefix`, trying the v2 naming then v1
fn find_target<'m>(model: &'m [ModelSegment], prefix: &str) -> Result<(&'m ModelSegment, SiteMap)> {
    for map in [sites::V2, sites::V1] {
        let Some(site) = map.site_for_prefix(prefix) else {
            continue;
        };
        if let Some(segment) = model.iter().find(|s| s.name == site) {
            return Ok((segment, map));
        }
    }
    Err(Error::path(format!(
        "no segment in the model is recorded as '{prefix}'"
    )))
}

/// Segments from the root to the site measured by `prefix`, root first
pub fn trace_path(model: &[ModelSegment], prefix: &str) -> Result<Vec<PathStep>> {
    let (target, map) = find_target(model, prefix)?;
    let step = |segment: &ModelSegment| PathStep {
        site: segment.name.clone(),
        prefix: map.prefix_for_site(&segment.name).map(str::to_string),
    };

    let mut path = vec![step(target)];
    let mut inlet = target.inlet_node;

    while inlet != ROOT_NODE {
        if path.len() > model.len() {
            return Err(Error::path(format!(
                "loop detected while tracing upstream of '{}'",
                target.name
            )));
        }
        let upstream = model
            .iter()
            .find(|s| s.outlet_node == inlet)
            .ok_or_else(|| Error::path(format!("no segment ends at node {inlet}")))?;
        trace!("node {} <- {}", inlet, upstream.name);
        path.push(step(upstream));
        inlet = upstream.inlet_node;
    }

    path.reverse();
    Ok(path)
}
