// Maeve - Reading Log Bot for Book Clubs
// Copyright (C) 2025 Henning Berge
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

//! Chat platform seam
//!
//! Connections, slash commands, buttons and embeds all live in the chat
//! platform integration. The core only asks it who a member is.

use std::collections::HashMap;

/// A member as the chat platform knows them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub user_id: i64,
    pub name: String,
    pub discriminator: String,
    /// Server the member was seen on, if any
    pub guild_id: Option<i64>,
}

impl Member {
    pub fn new(user_id: i64, name: impl Into<String>) -> Self {
        Self {
            user_id,
            name: name.into(),
            discriminator: "0000".to_string(),
            guild_id: None,
        }
    }

    pub fn with_discriminator(mut self, discriminator: impl Into<String>) -> Self {
        self.discriminator = discriminator.into();
        self
    }

    pub fn in_guild(mut self, guild_id: i64) -> Self {
        self.guild_id = Some(guild_id);
        self
    }
}

/// Identity lookup provided by the chat platform integration
pub trait PresentationGateway {
    /// Resolve a member across every server the bot is on
    fn find_member(&self, user_id: i64) -> Option<Member>;
}

/// Fixed member table, for tests and the desktop CLI
#[derive(Debug, Clone, Default)]
pub struct StaticGateway {
    members: HashMap<i64, Member>,
}

impl StaticGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_member(mut self, member: Member) -> Self {
        self.insert(member);
        self
    }

    pub fn insert(&mut self, member: Member) {
        self.members.insert(member.user_id, member);
    }
}

impl PresentationGateway for StaticGateway {
    fn find_member(&self, user_id: i64) -> Option<Member> {
        self.members.get(&user_id).cloned()
    }
}

/// Short stable handle: lowercased alphanumerics of the name (at most 10)
/// followed by `_` and the discriminator
pub fn in_app_user_name(member: &Member) -> String {
    let handle: String = member
        .name
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .take(10)
        .collect();
    format!("{}_{}", handle, member.discriminator)
}
