//! Commit object
//!
//! Commits record a snapshot of the working tree together with its history:
//! - A tree object ID (directory snapshot)
//! - At most one parent commit ID (history is strictly linear)
//! - Author and committer information
//! - Commit message
//!
//! ## Format
//!
//! On disk:
//! ```text
//! commit <size>\0
//! tree <tree-sha>
//! parent <parent-sha>
//! author <name> <email> <timestamp> <timezone>
//! committer <name> <email> <timestamp> <timezone>
//!
//! <commit message>
//! ```
//!
//! The parent line is absent on the root commit.

use crate::artifacts::core::error::KitError;
use crate::artifacts::objects::object::{Object, Packable, Unpackable, frame};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;

/// Message used when a commit is created without one
pub const DEFAULT_COMMIT_MESSAGE: &str = "Default commit message";

const DEFAULT_AUTHOR_NAME: &str = "kit";
const DEFAULT_AUTHOR_EMAIL: &str = "kit@example.com";

/// Author or committer information
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Author {
    name: String,
    email: String,
    timestamp: chrono::DateTime<chrono::FixedOffset>,
}

impl Author {
    /// Create a new author stamped with the current local time
    pub fn new(name: String, email: String) -> Self {
        Author {
            name,
            email,
            timestamp: chrono::Local::now().fixed_offset(),
        }
    }

    pub fn new_with_timestamp(
        name: String,
        email: String,
        timestamp: chrono::DateTime<chrono::FixedOffset>,
    ) -> Self {
        Author {
            name,
            email,
            timestamp,
        }
    }

    /// Load author information from the environment
    ///
    /// Reads `KIT_AUTHOR_NAME`, `KIT_AUTHOR_EMAIL` and `KIT_AUTHOR_DATE`, falling
    /// back to a fixed identity and the current time.
    pub fn load_from_env() -> anyhow::Result<Self> {
        Self::from_settings(
            std::env::var("KIT_AUTHOR_NAME").ok(),
            std::env::var("KIT_AUTHOR_EMAIL").ok(),
            std::env::var("KIT_AUTHOR_DATE").ok(),
        )
    }

    /// Build an author from optional settings; blank values take the defaults.
    ///
    /// A name or email that would break the `name <email>` line is rejected.
    pub fn from_settings(
        name: Option<String>,
        email: Option<String>,
        date: Option<String>,
    ) -> anyhow::Result<Self> {
        let name = name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_AUTHOR_NAME.to_string());
        let email = email
            .filter(|email| !email.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_AUTHOR_EMAIL.to_string());
        check_identity("KIT_AUTHOR_NAME", &name)?;
        check_identity("KIT_AUTHOR_EMAIL", &email)?;

        match date {
            Some(date_str) => {
                let timestamp = chrono::DateTime::parse_from_rfc2822(&date_str)
                    .or_else(|_| {
                        chrono::DateTime::parse_from_str(&date_str, "%Y-%m-%d %H:%M:%S %z")
                    })
                    .with_context(|| format!("KIT_AUTHOR_DATE is not a valid date: {date_str}"))?;
                Ok(Author::new_with_timestamp(name, email, timestamp))
            }
            None => Ok(Author::new(name, email)),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// "Name <email@example.com>"
    pub fn display_name(&self) -> String {
        format!("{} <{}>", self.name, self.email)
    }

    /// "Name <email> timestamp timezone", as written in the commit payload
    pub fn display(&self) -> String {
        format!(
            "{} <{}> {} {}",
            self.name,
            self.email,
            self.timestamp.timestamp(),
            self.timestamp.format("%z")
        )
    }

    /// "Mon Jan 1 12:34:56 2024 +0000"
    pub fn readable_timestamp(&self) -> String {
        self.timestamp
            .format("%a %b %-d %H:%M:%S %Y %z")
            .to_string()
    }

    pub fn timestamp(&self) -> chrono::DateTime<chrono::FixedOffset> {
        self.timestamp
    }
}

impl TryFrom<&str> for Author {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        // Split from the right: timezone, timestamp, then "name <email>"
        let parts: Vec<&str> = value.rsplitn(3, ' ').collect();
        if parts.len() < 3 {
            anyhow::bail!("Invalid author format: {:?}", value);
        }

        let timezone = parts[0];
        let timestamp = parts[1]
            .parse::<i64>()
            .with_context(|| format!("Invalid timestamp {:?}", parts[1]))?;
        let name_email_part = parts[2];

        let email_start = name_email_part
            .find('<')
            .context("Invalid author format: missing '<'")?;
        let email_end = name_email_part
            .rfind('>')
            .context("Invalid author format: missing '>'")?;
        if email_end < email_start {
            anyhow::bail!("Invalid author format: misplaced '>'");
        }

        let name = name_email_part[..email_start].trim().to_string();
        let email = name_email_part[email_start + 1..email_end].to_string();

        let offset = chrono::DateTime::parse_from_str(&format!("1970-01-01 00:00:00 {timezone}"), "%Y-%m-%d %H:%M:%S %z")
            .with_context(|| format!("Invalid timezone {:?}", timezone))?
            .offset()
            .to_owned();
        let datetime = chrono::DateTime::from_timestamp(timestamp, 0)
            .context("Invalid timestamp")?
            .with_timezone(&offset);

        Ok(Author {
            name,
            email,
            timestamp: datetime,
        })
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    /// Parent commit ID (absent for the root commit)
    parent: Option<ObjectId>,
    /// Tree object ID representing the directory snapshot
    tree_oid: ObjectId,
    author: Author,
    committer: Author,
    message: String,
}

impl Commit {
    /// Create a new commit whose committer is its author
    ///
    /// A blank message is replaced by [`DEFAULT_COMMIT_MESSAGE`].
    pub fn new(
        parent: Option<ObjectId>,
        tree_oid: ObjectId,
        author: Author,
        message: String,
    ) -> Self {
        let message = message.trim_end().to_string();
        let message = if message.trim().is_empty() {
            DEFAULT_COMMIT_MESSAGE.to_string()
        } else {
            message
        };

        Commit {
            parent,
            tree_oid,
            author: author.clone(),
            committer: author,
            message,
        }
    }

    /// First line of the message
    pub fn short_message(&self) -> String {
        self.message.lines().next().unwrap_or("").to_string()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn tree_oid(&self) -> &ObjectId {
        &self.tree_oid
    }

    pub fn parent(&self) -> Option<&ObjectId> {
        self.parent.as_ref()
    }

    pub fn author(&self) -> &Author {
        &self.author
    }

    pub fn committer(&self) -> &Author {
        &self.committer
    }

    fn header_lines(&self) -> Vec<String> {
        let mut lines = vec![format!("tree {}", self.tree_oid.as_ref())];
        if let Some(parent) = &self.parent {
            lines.push(format!("parent {}", parent.as_ref()));
        }
        lines.push(format!("author {}", self.author.display()));
        lines.push(format!("committer {}", self.committer.display()));

        lines
    }
}

impl Packable for Commit {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let payload = format!("{}\n\n{}\n", self.header_lines().join("\n"), self.message);

        Ok(frame(self.object_type(), payload.as_bytes()))
    }
}

/// Header fields collected while scanning the commit payload
#[derive(Default)]
struct CommitHeaders {
    tree: Option<ObjectId>,
    parent: Option<ObjectId>,
    author: Option<Author>,
    committer: Option<Author>,
}

impl Unpackable for Commit {
    fn deserialize(payload: Bytes) -> anyhow::Result<Self> {
        let content = std::str::from_utf8(&payload).context("commit payload is not UTF-8")?;
        let (headers, message) = content
            .split_once("\n\n")
            .context("Invalid commit object: missing blank line before message")?;

        let mut fields = CommitHeaders::default();
        for line in headers.lines() {
            let (key, value) = line
                .split_once(' ')
                .with_context(|| format!("Invalid commit object: malformed line {:?}", line))?;

            match key {
                "tree" if fields.tree.is_none() => {
                    fields.tree = Some(ObjectId::try_parse(value.to_string())?)
                }
                "parent" if fields.parent.is_none() => {
                    fields.parent = Some(ObjectId::try_parse(value.to_string())?)
                }
                "author" if fields.author.is_none() => fields.author = Some(Author::try_from(value)?),
                "committer" if fields.committer.is_none() => {
                    fields.committer = Some(Author::try_from(value)?)
                }
                "tree" | "parent" | "author" | "committer" => {
                    anyhow::bail!("Invalid commit object: duplicate {} line", key)
                }
                _ => anyhow::bail!("Invalid commit object: unknown header {:?}", key),
            }
        }

        Ok(Commit {
            tree_oid: fields.tree.context("Invalid commit object: missing tree line")?,
            parent: fields.parent,
            author: fields
                .author
                .context("Invalid commit object: missing author line")?,
            committer: fields
                .committer
                .context("Invalid commit object: missing committer line")?,
            message: message.strip_suffix('\n').unwrap_or(message).to_string(),
        })
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }

    fn display(&self) -> String {
        format!("{}\n\n{}", self.header_lines().join("\n"), self.message)
    }
}

fn check_identity(setting: &str, value: &str) -> anyhow::Result<()> {
    if value.contains(['\n', '\r', '<', '>']) {
        return Err(KitError::invalid_argument(format!(
            "{} must not contain line breaks or angle brackets: {:?}",
            setting, value
        ))
        .into());
    }

    Ok(())
}
