use crate::config::EmitterConfig;
use anyhow::Result;
use colored::{Color, Colorize};
use std::io::Write;

pub type EmitResult = Result<()>;

#[derive(Debug, Clone)]
pub struct EmitContext {
    pub indent_level: usize,
    pub indent_chars: String,
    pub use_colors: bool,
}

impl EmitContext {
    pub fn new() -> Self {
        Self {
            indent_level: 0,
            indent_chars: "    ".to_string(),
            use_colors: true,
        }
    }

    pub fn from_config(config: &EmitterConfig) -> Self {
        Self {
            indent_level: 0,
            indent_chars: config.indent_style.unit(),
            use_colors: config.use_colors,
        }
    }

    pub fn indent(&mut self) {
        self.indent_level += 1;
    }

    pub fn dedent(&mut self) {
        if self.indent_level > 0 {
            self.indent_level -= 1;
        }
    }

    pub fn get_indent(&self) -> String {
        self.indent_chars.repeat(self.indent_level)
    }

}

impl Default for EmitContext {
    fn default() -> Self {
        Self::new()
    }
}

pub trait Emitter {
    type Item;

    fn emit<W: Write>(
        &self,
        item: &Self::Item,
        writer: &mut W,
        context: &mut EmitContext,
    ) -> EmitResult;

    /// Context a fresh emission starts from.
    fn context(&self) -> EmitContext {
        EmitContext::new()
    }

    fn emit_to_string(&self, item: &Self::Item) -> Result<String> {
        let mut buffer = Vec::new();
        let mut context = self.context();
        self.emit(item, &mut buffer, &mut context)?;
        Ok(String::from_utf8(buffer)?)
    }
}

pub struct EmitHelper;

impl EmitHelper {
    pub fn write_line<W: Write>(writer: &mut W, context: &EmitContext, text: &str) -> EmitResult {
        writeln!(writer, "{}{}", context.get_indent(), text)?;
        Ok(())
    }

    /// `text` in `color` when the context allows it.
    pub fn paint(context: &EmitContext, text: &str, color: Color) -> String {
        if context.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    pub fn write_block<W: Write, F>(
        writer: &mut W,
        context: &mut EmitContext,
        header: &str,
        body: F,
    ) -> EmitResult
    where
        F: FnOnce(&mut W, &mut EmitContext) -> EmitResult,
    {
        Self::write_line(writer, context, &format!("{} {{", header))?;
        context.indent();
        body(writer, context)?;
        context.dedent();
        Self::write_line(writer, context, "}")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IndentStyle;

    #[test]
    fn test_print_context_indentation() {
        let mut ctx = EmitContext::new();
        assert_eq!(ctx.get_indent(), "");

        ctx.indent();
        ctx.indent();
        assert_eq!(ctx.get_indent(), "        ");

        ctx.dedent();
        ctx.dedent();
        ctx.dedent();
        assert_eq!(ctx.indent_level, 0);
    }

    #[test]
    fn test_context_from_config() {
        let config = EmitterConfig::plain().with_indent(IndentStyle::Tabs);
        let mut ctx = EmitContext::from_config(&config);
        ctx.indent();

        assert!(!ctx.use_colors);
        assert_eq!(ctx.get_indent(), "\t");
    }

    #[test]
    fn test_write_block() {
        let mut ctx = EmitContext::from_config(&EmitterConfig::plain());
        let mut out = Vec::new();
        EmitHelper::write_block(&mut out, &mut ctx, "@k()", |w, ctx| {
            EmitHelper::write_line(w, ctx, "unreachable")
        })
        .unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "@k() {\n    unreachable\n}\n");
        assert_eq!(ctx.indent_level, 0);
    }

    #[test]
    fn test_paint_respects_colors_flag() {
        let ctx = EmitContext::from_config(&EmitterConfig::plain());
        assert_eq!(EmitHelper::paint(&ctx, "apply", Color::Magenta), "apply");
    }
}
