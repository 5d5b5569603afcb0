// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::Write;

use super::Diagnostic;

pub trait DiagnosticRenderer {
	fn render(&self, diagnostic: &Diagnostic) -> String;
}

pub struct DefaultRenderer;

impl DefaultRenderer {
	pub fn render_string(diagnostic: &Diagnostic) -> String {
		DefaultRenderer.render(diagnostic)
	}
}

impl DiagnosticRenderer for DefaultRenderer {
	fn render(&self, d: &Diagnostic) -> String {
		let mut output = String::new();
		render_into(&mut output, d, 0);
		output
	}
}

fn render_into(output: &mut String, d: &Diagnostic, depth: usize) {
	let indent = "  ".repeat(depth);

	let _ = writeln!(output, "{}error[{}]: {}", indent, d.code, d.message);

	if let Some(label) = &d.label {
		let _ = writeln!(output, "{} = {}", indent, label);
	}

	if let Some(help) = &d.help {
		let _ = writeln!(output, "\n{}help: {}", indent, help);
	}

	for note in &d.notes {
		let _ = writeln!(output, "\n{}note: {}", indent, note);
	}

	if let Some(cause) = &d.cause {
		let _ = writeln!(output, "\n{}caused by:", indent);
		render_into(output, cause, depth + 1);
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_render_full() {
		let diagnostic = Diagnostic::new("QUERY_001", "statement failed")
			.with_label("in query")
			.with_help("check the syntax")
			.with_note("engine said no")
			.with_cause(Diagnostic::new("VTAB_001", "missing required constraint"));

		let out = DefaultRenderer::render_string(&diagnostic);
		assert!(out.starts_with("error[QUERY_001]: statement failed\n"));
		assert!(out.contains(" = in query"));
		assert!(out.contains("help: check the syntax"));
		assert!(out.contains("note: engine said no"));
		assert!(out.contains("caused by:"));
		assert!(out.contains("  error[VTAB_001]: missing required constraint"));
	}
}
