//! `restyle tokens`: dump the raw token stream for debugging.

use std::io::{self, Write};
use std::path::Path;

use restyle_lexer_core::{Span, TokenFlags, Tokenizer};

use super::{read_file, CommandError, Output, OutputFormat, ScanOptions};

/// Tokenize a file and display the token stream.
pub fn dump_tokens(path: &Path, options: &ScanOptions) -> Result<(), CommandError> {
    let content = read_file(path)?;
    let source: Vec<u16> = content.encode_utf16().collect();
    let format = options.format();

    Output::open(options.output.as_deref())?.write_with(|out| {
        if format == OutputFormat::Text {
            let count = Tokenizer::new(&source).count();
            writeln!(out, "Tokens for '{}' ({count} tokens):", path.display())?;
        }
        write_tokens(&source, format, out)
    })
}

/// Write one line per token, `Eof` excluded.
pub fn write_tokens(source: &[u16], format: OutputFormat, out: &mut dyn Write) -> io::Result<()> {
    if format == OutputFormat::Tsv {
        writeln!(out, "kind\tstart\tend\tflags")?;
    }

    let mut start = 0;
    for token in Tokenizer::new(source) {
        let span = Span::new(start, start + token.len);
        start = span.end;
        let flags = flag_names(token.flags);
        match format {
            OutputFormat::Text => {
                let text = String::from_utf16_lossy(span.slice(source));
                write!(out, "  {} @ {span} {text:?}", token.kind)?;
                if !flags.is_empty() {
                    write!(out, " [{}]", flags.join(", "))?;
                }
                writeln!(out)?;
            }
            OutputFormat::Tsv => {
                writeln!(
                    out,
                    "{}\t{}\t{}\t{}",
                    token.kind,
                    span.start,
                    span.end,
                    flags.join(",")
                )?;
            }
        }
    }

    Ok(())
}

fn flag_names(flags: TokenFlags) -> Vec<&'static str> {
    let mut names = Vec::new();
    if flags.contains(TokenFlags::UNTERMINATED) {
        names.push("unterminated");
    }
    if flags.contains(TokenFlags::ESCAPED) {
        names.push("escaped");
    }
    names
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
