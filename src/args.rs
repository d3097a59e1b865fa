use crate::tags::{normalize_tag, parse_tag_list};
use std::error::Error;

pub struct ArgParser {
    iter: std::vec::IntoIter<String>,
    command_name: String,
}

impl ArgParser {
    pub fn new(args: Vec<String>, command_name: &str) -> Self {
        Self { iter: args.into_iter(), command_name: command_name.to_string() }
    }

    /// Extract a single tag from -t/--tag flag
    pub fn extract_tag(&mut self) -> Result<String, Box<dyn Error>> {
        let raw = self.extract_value("-t/--tag")?;
        let tag = normalize_tag(&raw);
        if tag.is_empty() {
            return Err(
                format!("Invalid tag provided to {}", self.command_name).into()
            );
        }
        Ok(tag)
    }

    /// Extract a comma-separated tag list from --tags
    pub fn extract_tag_list(&mut self) -> Result<Vec<String>, Box<dyn Error>> {
        let raw = self.extract_value("--tags")?;
        Ok(parse_tag_list(&raw))
    }

    /// Extract a string value for a flag
    pub fn extract_value(
        &mut self,
        flag: &str,
    ) -> Result<String, Box<dyn Error>> {
        self.iter.next().ok_or_else(|| {
            format!("Provide a value after {} for {}", flag, self.command_name)
                .into()
        })
    }

    /// Get next argument
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<String> {
        self.iter.next()
    }

    pub fn unknown_flag(&self, flag: &str) -> Box<dyn Error> {
        format!("Unknown flag for {}: {flag}", self.command_name).into()
    }
}

/// Field changes requested on the command line for `new` and `edit`.
#[derive(Default, Debug)]
pub struct NoteFields {
    pub title: Option<String>,
    pub body: Option<String>,
    pub tags: Option<Vec<String>>,
    pub meta_type: Option<String>,
    pub status: Option<String>,
    pub responsible: Option<String>,
    pub positional: Vec<String>,
}

impl NoteFields {
    pub fn parse(
        args: Vec<String>,
        command_name: &str,
    ) -> Result<Self, Box<dyn Error>> {
        let mut fields = Self::default();
        let mut parser = ArgParser::new(args, command_name);
        while let Some(arg) = parser.next() {
            match arg.as_str() {
                "-t" | "--tag" => {
                    let tag = parser.extract_tag()?;
                    fields.tags.get_or_insert_with(Vec::new).push(tag);
                }
                "--tags" => {
                    let list = parser.extract_tag_list()?;
                    fields.tags.get_or_insert_with(Vec::new).extend(list);
                }
                "--title" => fields.title = Some(parser.extract_value(&arg)?),
                "--body" => fields.body = Some(parser.extract_value(&arg)?),
                "--type" => fields.meta_type = Some(parser.extract_value(&arg)?),
                "--status" => fields.status = Some(parser.extract_value(&arg)?),
                "--responsible" => {
                    fields.responsible = Some(parser.extract_value(&arg)?)
                }
                other if other.starts_with("--") => {
                    return Err(parser.unknown_flag(other));
                }
                _ => fields.positional.push(arg),
            }
        }
        Ok(fields)
    }

    /// True when any metadata or body change was requested by flag.
    pub fn has_changes(&self) -> bool {
        self.title.is_some()
            || self.body.is_some()
            || self.tags.is_some()
            || self.meta_type.is_some()
            || self.status.is_some()
            || self.responsible.is_some()
    }
}
