use std::io::{self, Write};

use stockagent_mcp::{SERVER_NAME, TOOL_SUMMARIES};

/// Writes the startup banner listing the registered tools.
pub fn write_banner(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "=== MCP 서버 시작 ===")?;
    writeln!(out, "서버 이름: {SERVER_NAME}")?;
    writeln!(out, "등록된 도구들:")?;
    for (name, summary) in TOOL_SUMMARIES {
        writeln!(out, "- {name}: {summary}")?;
    }
    writeln!(out, "==================")?;
    out.flush()
}
