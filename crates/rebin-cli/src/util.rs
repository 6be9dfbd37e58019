use std::io::{self, BufReader, BufWriter, Write as _};

use anyhow::Context;

/// Reads a JSON value of type `T` from stdin.
///
/// `kind` names the expected value in error messages.
pub fn read_json_stdin<T>(kind: &str) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
{
    let reader = BufReader::new(io::stdin().lock());
    let value = serde_json::from_reader(reader)
        .with_context(|| format!("Failed to parse {kind} JSON from stdin"))?;
    Ok(value)
}

/// Writes `value` to stdout as pretty-printed JSON followed by a newline.
pub fn write_json_stdout<T>(value: &T) -> anyhow::Result<()>
where
    T: serde::Serialize,
{
    let mut writer = BufWriter::new(io::stdout().lock());
    serde_json::to_writer_pretty(&mut writer, value).context("Failed to write JSON to stdout")?;
    writeln!(writer).context("Failed to write newline after JSON to stdout")?;
    writer.flush().context("Failed to flush stdout")?;
    Ok(())
}
