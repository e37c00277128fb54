//! Block attribute list parsing.
//!
//! Parses AsciiDoc attribute lines like `[source#main,c,output=main.c]`
//! into positional and named attributes.

use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{escaped_transform, tag, take_while, take_while1},
    character::complete::{char, multispace0, none_of},
    combinator::{all_consuming, map, value},
    multi::separated_list0,
    sequence::{delimited, preceded},
};

/// One entry of an attribute list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeItem {
    /// A value identified by its position, e.g. the style or language.
    Positional(String),
    /// A `key=value` pair.
    Named(String, String),
}

/// Check if a character is valid in an attribute name.
fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '-'
}

/// Parse an attribute name.
fn parse_name(input: &str) -> IResult<&str, &str> {
    take_while1(is_name_char).parse(input)
}

/// Parse a quoted string value with escape handling.
fn parse_quoted_string(input: &str) -> IResult<&str, String> {
    delimited(
        char('"'),
        escaped_transform(
            none_of("\\\""),
            '\\',
            alt((value("\\", tag("\\")), value("\"", tag("\"")))),
        ),
        char('"'),
    )
    .parse(input)
}

/// Parse an unquoted value, running up to the next `,` or `]`.
fn parse_unquoted_value(input: &str) -> IResult<&str, String> {
    map(take_while(|c: char| c != ',' && c != ']'), |s: &str| {
        s.trim().to_string()
    })
    .parse(input)
}

/// Parse an attribute value (quoted or unquoted).
fn parse_value(input: &str) -> IResult<&str, String> {
    alt((
        delimited(multispace0, parse_quoted_string, multispace0),
        parse_unquoted_value,
    ))
    .parse(input)
}

/// Parse `name=value`.
fn parse_named(input: &str) -> IResult<&str, AttributeItem> {
    map(
        (parse_name, multispace0, char('='), parse_value),
        |(key, _, _, val)| AttributeItem::Named(key.to_string(), val),
    )
    .parse(input)
}

fn parse_item(input: &str) -> IResult<&str, AttributeItem> {
    preceded(
        multispace0,
        alt((parse_named, map(parse_value, AttributeItem::Positional))),
    )
    .parse(input)
}

fn parse_list(input: &str) -> IResult<&str, Vec<AttributeItem>> {
    all_consuming(delimited(
        char('['),
        separated_list0(char(','), parse_item),
        (char(']'), multispace0),
    ))
    .parse(input)
}

/// A parsed attribute list with convenient accessors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeList {
    pub items: Vec<AttributeItem>,
}

impl AttributeList {
    /// Parses a whole line; `None` if it is not an attribute list.
    pub fn parse(line: &str) -> Option<Self> {
        match parse_list(line.trim_start()) {
            Ok((_, items)) => Some(Self { items }),
            Err(_) => None,
        }
    }

    /// Positional values in order, empty ones included.
    pub fn positional(&self) -> Vec<&str> {
        self.items
            .iter()
            .filter_map(|item| match item {
                AttributeItem::Positional(v) => Some(v.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Gets a named value by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.items.iter().find_map(|item| match item {
            AttributeItem::Named(k, v) if k == key => Some(v.as_str()),
            _ => None,
        })
    }

    /// All named pairs.
    pub fn named(&self) -> impl Iterator<Item = (&str, &str)> {
        self.items.iter().filter_map(|item| match item {
            AttributeItem::Named(k, v) => Some((k.as_str(), v.as_str())),
            _ => None,
        })
    }

    /// The block style, stripped of `#id`, `.role` and `%option` shorthands.
    pub fn style(&self) -> Option<&str> {
        let first = *self.positional().first()?;
        let style = first
            .split(['#', '.', '%'])
            .next()
            .unwrap_or_default();
        (!style.is_empty()).then_some(style)
    }

    /// The block id, from the `#id` shorthand or an `id=` entry.
    pub fn id(&self) -> Option<&str> {
        if let Some(id) = self.get("id") {
            return Some(id);
        }
        let first = *self.positional().first()?;
        let (_, rest) = first.split_once('#')?;
        let id = rest.split(['.', '%']).next().unwrap_or_default();
        (!id.is_empty()).then_some(id)
    }

    /// The language of a source block.
    pub fn language(&self) -> Option<&str> {
        self.get("language").or_else(|| {
            self.positional()
                .get(1)
                .copied()
                .filter(|lang| !lang.is_empty())
        })
    }
}
