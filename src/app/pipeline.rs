//! Shared optimize pipeline used by the interactive and scripting front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! request -> bridge invoke -> interpret assignments
//!
//! The front-ends then focus on presentation (tables vs raw JSON).

use serde_json::Value;

use crate::bridge::OptimizerBridge;
use crate::domain::OptimizationRequest;
use crate::error::AppError;
use crate::report::Assignments;

/// All computed outputs of one optimizer run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    /// The JSON-decoded optimizer stdout, untouched.
    pub result: Value,
    /// The result interpreted as bin assignments for display.
    pub assignments: Assignments,
}

/// Invoke the optimizer and interpret its result.
pub fn optimize(
    bridge: &OptimizerBridge,
    request: &OptimizationRequest,
) -> Result<RunOutput, AppError> {
    let result = bridge.invoke(request)?;
    let assignments = Assignments::from_result_value(&result)?;
    Ok(RunOutput {
        result,
        assignments,
    })
}

#[cfg(test)]
#[cfg(unix)]
mod tests {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    use crate::domain::{BinType, ItemType};

    #[test]
    fn pipeline_interprets_stub_result() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("engine.sh");
        fs::write(&path, "#!/bin/sh\ncat > /dev/null; echo '{\"bin1\":[\"1\"]}'\n").unwrap();
        let mut perms = fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&path, perms).unwrap();

        let request = OptimizationRequest {
            item_types: vec![ItemType {
                number: 1,
                width: 5.0,
                height: 3.0,
                price: 25.0,
                quantity: 2,
            }],
            bin_types: vec![BinType {
                number: 1,
                width: 20.0,
                height: 30.0,
            }],
        };

        let run = optimize(&OptimizerBridge::new(&path), &request).unwrap();
        assert_eq!(run.result, serde_json::json!({"bin1": ["1"]}));
        assert_eq!(
            run.assignments.bins,
            vec![("bin1".to_string(), vec!["1".to_string()])]
        );
    }
}
