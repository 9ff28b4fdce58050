//! Property reading: rendered declaration values → typed [`Style`] fields.
//!
//! This is the inverse of [`crate::css::declaration::generate`]. A value that
//! does not have the expected shape never aborts reading the rest of the
//! node: [`style_from_declarations`] logs it and falls back to a zero/auto
//! default for that one property.

use tracing::{debug, warn};

use crate::css::declaration::Declarations;
use crate::css::scalar::{Length, TrackSize};
use crate::css::styles::*;
use crate::css::tokenizer::{tokenize, Token, ValueToken};

/// Errors from reading a declaration value back.
#[derive(Debug, thiserror::Error)]
pub enum ValueError {
    #[error("unknown property: {0}")]
    UnknownProperty(String),
    #[error("invalid value for {property}: {message}")]
    InvalidValue { property: String, message: String },
}

fn invalid(property: &str, message: impl Into<String>) -> ValueError {
    ValueError::InvalidValue {
        property: property.into(),
        message: message.into(),
    }
}

fn tokens<'a>(value: &'a str, property: &str) -> Result<Vec<ValueToken<'a>>, ValueError> {
    tokenize(value).ok_or_else(|| invalid(property, format!("untokenizable value: {value}")))
}

/// Parse a rendered length: `12px`, `100%`, `fit-content`, `100vh`, `0`.
pub fn parse_length(value: &str, property: &str) -> Result<Length, ValueError> {
    let toks = tokens(value, property)?;
    let [tok] = toks.as_slice() else {
        return Err(invalid(property, format!("expected one length, got: {value}")));
    };
    match tok.token {
        Token::Dimension => match tok.dimension() {
            Some((n, "px")) => Ok(Length::Px(n)),
            Some((n, "%")) if n == 100.0 => Ok(Length::Fill),
            Some((n, "vh" | "vw")) if n == 100.0 => Ok(Length::Screen),
            _ => Err(invalid(property, format!("unsupported dimension: {value}"))),
        },
        Token::Number if tok.number() == Some(0.0) => Ok(Length::Px(0.0)),
        Token::Ident if tok.text == "fit-content" || tok.text == "auto" => Ok(Length::Auto),
        _ => Err(invalid(property, format!("expected length, got: {value}"))),
    }
}

/// Normalize any CSS color notation to lowercase hex (`#rrggbb`, or
/// `#rrggbbaa` when not fully opaque).
pub fn parse_color(value: &str, property: &str) -> Result<String, ValueError> {
    let color = csscolorparser::parse(value.trim())
        .map_err(|e| invalid(property, format!("{value}: {e}")))?;
    let [r, g, b, a] = color.to_rgba8();
    if a == 255 {
        Ok(format!("#{r:02x}{g:02x}{b:02x}"))
    } else {
        Ok(format!("#{r:02x}{g:02x}{b:02x}{a:02x}"))
    }
}

/// First family of a font stack, with quotes stripped.
pub fn parse_font_family(value: &str) -> Result<String, ValueError> {
    let toks = tokens(value, "font-family")?;
    let first = toks.first().ok_or_else(|| invalid("font-family", "empty font stack"))?;
    if let Some(quoted) = first.string_value() {
        return Ok(quoted.to_owned());
    }
    let words: Vec<&str> = toks
        .iter()
        .take_while(|t| t.token != Token::Comma)
        .map(|t| match t.token {
            Token::Ident => Ok(t.text),
            _ => Err(invalid("font-family", format!("unexpected token: {}", t.text))),
        })
        .collect::<Result<_, _>>()?;
    Ok(words.join(" "))
}

/// Every family of a font stack, quotes stripped, generic families included.
pub fn font_stack(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|f| f.trim().trim_matches(|c| c == '"' || c == '\'').trim().to_owned())
        .filter(|f| !f.is_empty())
        .collect()
}

pub fn parse_font_size(value: &str) -> Result<FontSize, ValueError> {
    if value.trim() == "inherit" {
        return Ok(FontSize::inherit());
    }
    match parse_length(value, "font-size")? {
        Length::Px(n) => Ok(FontSize::Px(n)),
        _ => Err(invalid("font-size", format!("expected pixels, got: {value}"))),
    }
}

pub fn parse_font_weight(value: &str) -> Result<FontWeight, ValueError> {
    match value.trim() {
        "normal" => return Ok(FontWeight::Regular),
        "bold" => return Ok(FontWeight::Bold),
        _ => {}
    }
    FontWeight::ALL
        .into_iter()
        .find(|w| w.as_css() == value.trim())
        .ok_or_else(|| invalid("font-weight", format!("unknown weight: {value}")))
}

/// Composite transform values read from a `transform` declaration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformParts {
    pub left: f64,
    pub top: f64,
    pub rotate: f64,
    pub scale_x: f64,
    pub scale_y: f64,
}

impl Default for TransformParts {
    /// The identity transform.
    fn default() -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            rotate: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
        }
    }
}

impl TransformParts {
    /// Write all five parts into `style`.
    pub fn apply(&self, style: &mut Style) {
        style.left = Some(self.left);
        style.top = Some(self.top);
        style.rotate = Some(self.rotate);
        style.scale_x = Some(self.scale_x);
        style.scale_y = Some(self.scale_y);
    }
}

/// Split a function call's arguments at top-level commas.
fn function_args<'t, 'a>(
    toks: &'t [ValueToken<'a>],
    property: &str,
) -> Result<(Vec<&'t ValueToken<'a>>, usize), ValueError> {
    let mut args = Vec::new();
    for (i, tok) in toks.iter().enumerate() {
        match tok.token {
            Token::ParenClose => return Ok((args, i + 1)),
            Token::Comma => {}
            _ => args.push(tok),
        }
    }
    Err(invalid(property, "unterminated function"))
}

fn px_arg(tok: &ValueToken<'_>, property: &str) -> Result<f64, ValueError> {
    match (tok.dimension(), tok.number()) {
        (Some((n, "px")), _) => Ok(n),
        (_, Some(n)) if n == 0.0 => Ok(0.0),
        _ => Err(invalid(property, format!("expected pixels, got: {}", tok.text))),
    }
}

fn number_arg(tok: &ValueToken<'_>, property: &str) -> Result<f64, ValueError> {
    tok.number()
        .ok_or_else(|| invalid(property, format!("expected number, got: {}", tok.text)))
}

/// Parse `translate(Xpx, Ypx) rotate(Ddeg) scale(SX, SY)`. Functions may be
/// absent; missing parts keep their identity value.
pub fn parse_transform(value: &str) -> Result<TransformParts, ValueError> {
    const P: &str = "transform";
    let toks = tokens(value, P)?;
    let mut parts = TransformParts::default();
    if value.trim() == "none" {
        return Ok(parts);
    }

    let mut i = 0;
    while i < toks.len() {
        let name = toks[i]
            .function_name()
            .ok_or_else(|| invalid(P, format!("expected function, got: {}", toks[i].text)))?;
        let (args, consumed) = function_args(&toks[i + 1..], P)?;
        match (name, args.as_slice()) {
            ("translate", [x, y]) => {
                parts.left = px_arg(x, P)?;
                parts.top = px_arg(y, P)?;
            }
            ("translate", [x]) => parts.left = px_arg(x, P)?,
            ("rotate", [d]) => {
                parts.rotate = match d.dimension() {
                    Some((n, "deg")) => n,
                    _ if d.number() == Some(0.0) => 0.0,
                    _ => return Err(invalid(P, format!("expected degrees, got: {}", d.text))),
                }
            }
            ("scale", [sx, sy]) => {
                parts.scale_x = number_arg(sx, P)?;
                parts.scale_y = number_arg(sy, P)?;
            }
            ("scale", [s]) => {
                let s = number_arg(s, P)?;
                parts.scale_x = s;
                parts.scale_y = s;
            }
            (other, _) => {
                return Err(invalid(P, format!("unsupported transform function: {other}")));
            }
        }
        i += 1 + consumed;
    }
    Ok(parts)
}

/// Parse a synthesized grid template `repeat(N, SIZE)` into count and size.
///
/// The first argument is the track count, the remainder the shared size.
pub fn parse_grid_template(value: &str, property: &str) -> Result<(u32, TrackSize), ValueError> {
    let toks = tokens(value, property)?;
    let Some(first) = toks.first() else {
        return Err(invalid(property, "empty template"));
    };
    if first.function_name() != Some("repeat") {
        return Err(invalid(property, format!("expected repeat(), got: {value}")));
    }
    let (args, consumed) = function_args(&toks[1..], property)?;
    if 1 + consumed != toks.len() {
        return Err(invalid(property, format!("trailing tokens in: {value}")));
    }
    let [count, size] = args.as_slice() else {
        return Err(invalid(property, format!("expected repeat(count, size), got: {value}")));
    };
    let count = match count.number() {
        Some(n) if n >= 0.0 && n.fract() == 0.0 => n as u32,
        _ => return Err(invalid(property, format!("bad track count: {}", count.text))),
    };
    let size = match (size.token.clone(), size.dimension()) {
        (_, Some((n, "fr"))) if n == 1.0 => TrackSize::Auto,
        (_, Some((n, "px"))) => TrackSize::Px(n),
        (Token::Ident, _) if size.text == "auto" => TrackSize::Auto,
        _ => return Err(invalid(property, format!("bad track size: {}", size.text))),
    };
    Ok((count, size))
}

pub fn parse_display(value: &str) -> Result<Display, ValueError> {
    match value.trim() {
        "block" => Ok(Display::Block),
        "inline" => Ok(Display::Inline),
        "flex" => Ok(Display::Flex),
        "grid" => Ok(Display::Grid),
        "none" => Ok(Display::None),
        other => Err(invalid("display", format!("unknown display: {other}"))),
    }
}

pub fn parse_flex_direction(value: &str) -> Result<FlexDirection, ValueError> {
    match value.trim() {
        "row" => Ok(FlexDirection::Row),
        "column" => Ok(FlexDirection::Column),
        "row-reverse" => Ok(FlexDirection::RowReverse),
        "column-reverse" => Ok(FlexDirection::ColumnReverse),
        other => Err(invalid("flex-direction", format!("unknown direction: {other}"))),
    }
}

pub fn parse_align_items(value: &str) -> Result<AlignItems, ValueError> {
    match value.trim() {
        "flex-start" | "start" => Ok(AlignItems::Start),
        "center" => Ok(AlignItems::Center),
        "flex-end" | "end" => Ok(AlignItems::End),
        "stretch" => Ok(AlignItems::Stretch),
        "baseline" => Ok(AlignItems::Baseline),
        other => Err(invalid("align-items", format!("unknown alignment: {other}"))),
    }
}

pub fn parse_justify_content(value: &str) -> Result<JustifyContent, ValueError> {
    match value.trim() {
        "flex-start" | "start" => Ok(JustifyContent::Start),
        "center" => Ok(JustifyContent::Center),
        "flex-end" | "end" => Ok(JustifyContent::End),
        "space-between" | "between" => Ok(JustifyContent::Between),
        "space-around" | "around" => Ok(JustifyContent::Around),
        "space-evenly" | "evenly" => Ok(JustifyContent::Evenly),
        other => Err(invalid("justify-content", format!("unknown distribution: {other}"))),
    }
}

pub fn parse_text_align(value: &str) -> Result<TextAlign, ValueError> {
    match value.trim() {
        "left" | "start" => Ok(TextAlign::Left),
        "center" => Ok(TextAlign::Center),
        "right" | "end" => Ok(TextAlign::Right),
        "justify" => Ok(TextAlign::Justify),
        other => Err(invalid("text-align", format!("unknown alignment: {other}"))),
    }
}

pub fn parse_border_style(value: &str) -> Result<BorderStyle, ValueError> {
    match value.trim() {
        "none" => Ok(BorderStyle::None),
        "solid" => Ok(BorderStyle::Solid),
        "dashed" => Ok(BorderStyle::Dashed),
        "dotted" => Ok(BorderStyle::Dotted),
        "double" => Ok(BorderStyle::Double),
        other => Err(invalid("border-style", format!("unknown border style: {other}"))),
    }
}

pub fn parse_position(value: &str) -> Result<Position, ValueError> {
    match value.trim() {
        "relative" => Ok(Position::Relative),
        "absolute" => Ok(Position::Absolute),
        other => Err(invalid("position", format!("unsupported position: {other}"))),
    }
}

/// Apply one rendered declaration to `style`.
pub fn apply_declaration(style: &mut Style, property: &str, value: &str) -> Result<(), ValueError> {
    match property {
        "width" => style.width = Some(parse_length(value, property)?),
        "height" => style.height = Some(parse_length(value, property)?),
        "padding-top" => style.padding_top = Some(parse_length(value, property)?),
        "padding-right" => style.padding_right = Some(parse_length(value, property)?),
        "padding-bottom" => style.padding_bottom = Some(parse_length(value, property)?),
        "padding-left" => style.padding_left = Some(parse_length(value, property)?),
        "margin-top" => style.margin_top = Some(parse_length(value, property)?),
        "margin-right" => style.margin_right = Some(parse_length(value, property)?),
        "margin-bottom" => style.margin_bottom = Some(parse_length(value, property)?),
        "margin-left" => style.margin_left = Some(parse_length(value, property)?),
        "gap" => style.gap = Some(parse_length(value, property)?),
        "border-width" => style.border_width = Some(parse_length(value, property)?),
        "border-radius" => style.border_radius = Some(parse_length(value, property)?),
        "border-style" => style.border_style = Some(parse_border_style(value)?),
        "border-color" => style.border_color = Some(parse_color(value, property)?),
        "color" => style.color = Some(parse_color(value, property)?),
        "background-color" => style.background_color = Some(parse_color(value, property)?),
        "font-family" => style.font_family = Some(parse_font_family(value)?),
        "font-size" => style.font_size = Some(parse_font_size(value)?),
        "font-weight" => style.font_weight = Some(parse_font_weight(value)?),
        "text-align" => style.text_align = Some(parse_text_align(value)?),
        "display" => style.display = Some(parse_display(value)?),
        "flex-direction" => style.flex_direction = Some(parse_flex_direction(value)?),
        "align-items" => style.align_items = Some(parse_align_items(value)?),
        "justify-content" => style.justify_content = Some(parse_justify_content(value)?),
        "grid-template-columns" => {
            let (count, size) = parse_grid_template(value, property)?;
            style.columns = Some(count);
            style.column_width = Some(size);
        }
        "grid-template-rows" => {
            let (count, size) = parse_grid_template(value, property)?;
            style.rows = Some(count);
            style.row_height = Some(size);
        }
        "transform" => parse_transform(value)?.apply(style),
        "z-index" => {
            let z = value
                .trim()
                .parse()
                .map_err(|_| invalid(property, format!("expected integer, got: {value}")))?;
            style.z_index = Some(z);
        }
        "position" => style.position = Some(parse_position(value)?),
        other => return Err(ValueError::UnknownProperty(other.to_owned())),
    }
    Ok(())
}

/// Zero/auto default used when a declaration cannot be read.
fn apply_fallback(style: &mut Style, property: &str) {
    match property {
        "grid-template-columns" => {
            style.columns = Some(1);
            style.column_width = Some(TrackSize::Auto);
        }
        "grid-template-rows" => {
            style.rows = Some(1);
            style.row_height = Some(TrackSize::Auto);
        }
        "transform" => TransformParts::default().apply(style),
        "z-index" => style.z_index = Some(0),
        "width" | "height" => {
            let _ = apply_declaration(style, property, "fit-content");
        }
        p if p.starts_with("padding-")
            || p.starts_with("margin-")
            || p == "gap"
            || p == "border-width"
            || p == "border-radius" =>
        {
            let _ = apply_declaration(style, property, "0");
        }
        _ => {}
    }
}

/// Read a full style back from rendered declarations.
///
/// A `position: relative` next to `z-index` is treated as implied by the
/// z-index and left unset.
pub fn style_from_declarations(decls: &Declarations) -> Style {
    style_from_declarations_over(decls, None)
}

/// Like [`style_from_declarations`], for declarations that render on top of
/// an `inherited` position. `relative` only counts as implied when nothing
/// is inherited; over an inherited position it is an explicit value.
pub fn style_from_declarations_over(decls: &Declarations, inherited: Option<Position>) -> Style {
    let mut style = Style::new();
    for (property, value) in decls.iter() {
        match apply_declaration(&mut style, property, value) {
            Ok(()) => {}
            Err(ValueError::UnknownProperty(p)) => debug!(property = %p, "ignoring unknown property"),
            Err(err) => {
                warn!(%err, "falling back to default value");
                apply_fallback(&mut style, property);
            }
        }
    }
    if inherited.is_none() && style.z_index.is_some() && style.position == Some(Position::Relative) {
        style.position = None;
    }
    style
}
