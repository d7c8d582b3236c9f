use crate::output::Output;
use cineverse_core::{contextual_callouts, CalloutInput};
use color_eyre::Result;
use serde_json::json;

pub fn run_callouts(item: &CalloutInput, output: &Output) -> Result<()> {
    let callouts = contextual_callouts(item);
    if !output.is_human() {
        output.data(&json!({ "callouts": callouts }));
    } else if callouts.is_empty() {
        output.info("No call-outs");
    } else {
        output.info(callouts.join(" · "));
    }
    Ok(())
}
