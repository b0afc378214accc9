//! Study view formatting

use crate::app::StudySnapshot;

/// Key help shown under the study view
pub const STUDY_HELP: &str = "[f]lip  [n]ext  [p]rev  [s]huffle  [r]estart  [a]dd  [o]pen <name>  \
[d]elete set  [w]rite  [q]uit  [?]help";

/// Format the study view for one frame
pub fn format_study_view(state: &StudySnapshot) -> String {
    let mut output = String::new();

    let source = state.source.as_deref().unwrap_or("(nothing selected)");
    let dirty = if state.dirty { " *" } else { "" };
    output.push_str(&format!("== {}{} ==\n", source, dirty));

    let session = &state.session;
    match (&session.term, session.position) {
        (Some(term), Some(position)) => {
            output.push_str(&format!("Card {} of {}\n\n", position, session.total));
            output.push_str(&format!("  {}\n", term));
            match &session.definition {
                Some(definition) => {
                    output.push_str("  ----\n");
                    for line in definition.lines() {
                        output.push_str(&format!("  {}\n", line));
                    }
                }
                None => output.push_str("\n  (press f to flip)\n"),
            }
        }
        _ if session.finished => {
            output.push_str(&format!(
                "Finished all {} cards. Press s to shuffle and go again.\n",
                session.total
            ));
        }
        _ => output.push_str("No session running.\n"),
    }

    output
}
