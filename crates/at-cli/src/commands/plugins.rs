//! Plugins command for listing processors and their configuration shapes.

use std::io::Write;

use anyhow::Result;
use at_core::ConfigurationShape;

use crate::registry;

pub fn run<W: Write>(writer: &mut W) -> Result<()> {
    for name in registry::names() {
        let Some(plugin) = registry::create(name) else {
            continue;
        };
        write_shape(writer, name, &plugin.configuration_shape())?;
    }
    Ok(())
}

fn write_shape<W: Write>(writer: &mut W, name: &str, shape: &ConfigurationShape) -> Result<()> {
    writeln!(writer, "{name}")?;
    writeln!(writer, "  [{}]", shape.section)?;
    for option in shape.options {
        let required = if option.required { ", required" } else { "" };
        writeln!(
            writer,
            "  {} ({}{required}): {}",
            option.name, option.kind, option.description
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use insta::assert_snapshot;

    #[test]
    fn plugins_command_lists_configuration_shape() {
        let mut output = Vec::new();
        run(&mut output).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert_snapshot!(output, @r"
        autotune
          [autotune]
          minimum_daily_work_duration (integer, required): hours every day has to reach (> 0)
          add_missing_days (boolean): fill calendar gaps with placeholder days
          default_project_name (string): project booked on placeholder entries (required with add_missing_days)
        ");
    }
}
