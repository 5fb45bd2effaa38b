//! Use-case prompt composition.
//!
//! Wraps the joined chunk text of a request in the instruction template for
//! the selected use case. The checksheet template demands a single
//! pipe-delimited table (one row per check, fixed column order) so the
//! renderer can map it straight onto spreadsheet cells; the work-instruction
//! template demands two fixed plain-text sections that map onto document
//! paragraphs. Passthrough returns the context unchanged.

use crate::models::UseCase;

/// Build the instruction string sent to the LLM.
pub fn compose(use_case: UseCase, context: &str) -> String {
    match use_case {
        UseCase::Checksheet => checksheet_prompt(context),
        UseCase::WorkInstruction => work_instruction_prompt(context),
        UseCase::Passthrough => context.to_string(),
    }
}

fn checksheet_prompt(manual_content: &str) -> String {
    format!(
        r#"You are a maintenance engineer and technical writer.

Read the operational manual content in MANUAL_CONTENT and convert it into a
technician checksheet. The checksheet will be filled in during inspection or
maintenance and mapped column-for-column into an Excel (XLSX) sheet.

MANUAL_CONTENT:
"""
{manual_content}
"""

REQUIREMENTS:
- Use only information from MANUAL_CONTENT; never invent parameters, limits,
  or steps that are not present.
- Break procedures into clear, atomic steps a technician can tick off.
- Use imperative verbs: "Check", "Verify", "Measure", "Ensure", "Record".
- Include limits, setpoints, tools, and PPE whenever they are mentioned.
- If something is not specified, write "Not specified in provided text" or
  "As per OEM specification" instead of guessing.

OUTPUT FORMAT:
- Respond with ONE table only, as plain text.
- One line per row. Separate cells with a pipe character (|).
- The first line is the header row with exactly these columns:
  Step | Task / Check Description | Reference | Expected Value / Limit | Unit | Tool / Instrument | Safety / PPE | Result | Remarks
- Leave the Result and Remarks cells blank for the technician to fill in.
- Do not merge cells. No narrative text, explanation, or commentary before
  or after the table."#
    )
}

fn work_instruction_prompt(manual_content: &str) -> String {
    format!(
        r#"Act as a maintenance/process engineer and technical writer.

Read the operational manual content in MANUAL_CONTENT and produce:
1) A concise but complete SUMMARY.
2) A detailed, step-by-step WORK INSTRUCTION suitable for a Word (.docx)
   document with headings and numbered lists.

MANUAL_CONTENT:
"""
{manual_content}
"""

GENERAL REQUIREMENTS:
- Use only the information from MANUAL_CONTENT unless something is strongly
  implied by it. Do not invent technical parameters, limits, or steps.
- Use clear, technician-friendly language with imperative verbs: "Check",
  "Verify", "Measure", "Ensure", "Record", "Install", "Remove".

OUTPUT STRUCTURE (plain text, exactly these two top-level sections):

SECTION 1: SUMMARY
- A short paragraph (3-6 sentences) summarizing the purpose of the equipment
  or system and the main task described.
- A bullet list of key points: main function, scope of this instruction, and
  critical safety concepts (high-level only).

SECTION 2: WORK INSTRUCTION
- The detailed work instruction, broken into well-defined numbered steps and
  sub-sections, in procedure order.

FORMATTING INSTRUCTIONS:
- Plain text only; no markup syntax. Headings must match the section titles
  above exactly ("SECTION 1: SUMMARY", "SECTION 2: WORK INSTRUCTION").
- Do not add any sections beyond the two listed.
- Do not add commentary outside the defined structure.
- If an item is not specified in MANUAL_CONTENT, write
  "Not specified in provided text" instead of guessing."#
    )
}
