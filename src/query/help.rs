// Help Topics Module
//
// Usage and example text for every supported command, served by the HELP
// statement and by the parser's error hints.

use std::io::{self, Write};

/// Usage help for one command.
pub struct HelpTopic {
    pub command: &'static str,
    pub usage: &'static str,
    pub example: &'static str,
}

pub const HELP_TOPICS: &[HelpTopic] = &[
    HelpTopic {
        command: "create table",
        usage: "CREATE TABLE <tableName> (<columnName> <dataType> [NOT NULL], ..., \
                [PRIMARY KEY (<col(s)>)] [, UNIQUE (<col(s)>)] \
                [, FOREIGN KEY (<col(s)>) REFERENCES <table> (<col(s)>)]);",
        example: "CREATE TABLE users (id INTEGER NOT NULL, name STRING, age INTEGER, \
                  PRIMARY KEY (id), UNIQUE (name));",
    },
    HelpTopic {
        command: "drop table",
        usage: "DROP TABLE <tableName>;",
        example: "DROP TABLE users;",
    },
    HelpTopic {
        command: "drop column",
        usage: "DROP COLUMN <tableName> <columnName>;",
        example: "DROP COLUMN users age;",
    },
    HelpTopic {
        command: "insert",
        usage: "INSERT INTO <tableName> (col1, col2, ...) VALUES (val1, val2, ...);",
        example: "INSERT INTO users (id, name, age) VALUES ('1', 'Alice', '30');",
    },
    HelpTopic {
        command: "select",
        usage: "SELECT <col1, col2, ...> FROM <tableName> [WHERE <condition>];",
        example: "SELECT * FROM users WHERE id = 1;",
    },
    HelpTopic {
        command: "update",
        usage: "UPDATE <tableName> SET <col1> = <val1>, <col2> = <val2>, ... WHERE <condition>;",
        example: "UPDATE users SET name = 'Alicia', age = '31' WHERE id = 1;",
    },
    HelpTopic {
        command: "delete",
        usage: "DELETE FROM <tableName> WHERE <condition>;",
        example: "DELETE FROM users WHERE id = 1;",
    },
    HelpTopic {
        command: "flush",
        usage: "FLUSH <filename> <key>;",
        example: "FLUSH database.db mysecretkey;",
    },
    HelpTopic {
        command: "load",
        usage: "LOAD <filename> <key>;",
        example: "LOAD database.db mysecretkey;",
    },
];

/// Look up help for a command, case-insensitively.
pub fn lookup(topic: &str) -> Option<&'static HelpTopic> {
    let topic = topic.trim().to_ascii_lowercase();
    HELP_TOPICS.iter().find(|t| t.command == topic)
}

/// Write the usage/example block for one topic.
pub fn write_topic(out: &mut impl Write, topic: &HelpTopic) -> io::Result<()> {
    writeln!(out, "Command: {}", topic.command)?;
    writeln!(out, "  Usage: {}", topic.usage)?;
    writeln!(out, "  Example: {}", topic.example)
}

/// Write the full command listing.
pub fn write_overview(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "Available commands and their usage:")?;
    for topic in HELP_TOPICS {
        write_topic(out, topic)?;
        writeln!(out)?;
    }
    Ok(())
}
