#![no_main]

use std::path::Path;

use libfuzzer_sys::fuzz_target;
use zitify::{compile, merge_fragments, DeploymentModel, Fragment, TargetNames};

fuzz_target!(|data: &[u8]| {
    let Ok(content) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(fragment) = Fragment::parse(Path::new("fuzz.yml"), content, "ziti_deployment") else {
        return;
    };

    // Merging a fragment with itself and compiling must never panic
    let merged = merge_fragments([fragment.clone(), fragment]);
    if let Ok(model) = DeploymentModel::from_mapping(merged) {
        let _ = compile(model, &TargetNames::Unbounded);
    }
});
