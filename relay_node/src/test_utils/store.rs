// SPDX-License-Identifier: AGPL-3.0-or-later

use std::collections::BTreeMap;

use async_graphql::{Context, Result};
use async_trait::async_trait;

use crate::graphql::{NodeFetcher, TypeResolver};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    pub id: u64,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Photo {
    pub photo_id: u64,
    pub width: i32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Post {
    pub id: u64,
    pub text: String,
}

/// Any record of the test store, handed to resolvers as parent value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Record {
    User(User),
    Photo(Photo),
    Post(Post),
}

impl Record {
    /// Name of the GraphQL object type of this record.
    pub fn type_name(&self) -> &'static str {
        match self {
            Record::User(_) => "User",
            Record::Photo(_) => "Photo",
            Record::Post(_) => "Post",
        }
    }

    /// Identifier of this record within its type.
    ///
    /// Photos keep theirs under a different name than users and posts.
    pub fn local_id(&self) -> u64 {
        match self {
            Record::User(user) => user.id,
            Record::Photo(photo) => photo.photo_id,
            Record::Post(post) => post.id,
        }
    }
}

/// In-memory records of three different types sharing overlapping local ids.
#[derive(Clone, Debug)]
pub struct TestStore {
    users: BTreeMap<u64, User>,
    photos: BTreeMap<u64, Photo>,
    posts: BTreeMap<u64, Post>,
}

impl Default for TestStore {
    fn default() -> Self {
        let users = vec![(1, "John Doe"), (2, "Jane Smith")]
            .into_iter()
            .map(|(id, name)| {
                let user = User {
                    id,
                    name: name.to_string(),
                };
                (id, user)
            })
            .collect();

        let photos = vec![(1, 300), (2, 400)]
            .into_iter()
            .map(|(photo_id, width)| (photo_id, Photo { photo_id, width }))
            .collect();

        let posts = vec![(1, "lorem"), (2, "ipsum")]
            .into_iter()
            .map(|(id, text)| {
                let post = Post {
                    id,
                    text: text.to_string(),
                };
                (id, post)
            })
            .collect();

        Self {
            users,
            photos,
            posts,
        }
    }
}

impl TestStore {
    /// Returns the record of the given type and local id.
    pub fn get(&self, type_name: &str, id: &str) -> Option<Record> {
        let id: u64 = id.parse().ok()?;

        match type_name {
            "User" => self.users.get(&id).cloned().map(Record::User),
            "Photo" => self.photos.get(&id).cloned().map(Record::Photo),
            "Post" => self.posts.get(&id).cloned().map(Record::Post),
            _ => None,
        }
    }

    /// Returns all users, then all photos, then all posts.
    pub fn all(&self) -> Vec<Record> {
        let users = self.users.values().cloned().map(Record::User);
        let photos = self.photos.values().cloned().map(Record::Photo);
        let posts = self.posts.values().cloned().map(Record::Post);
        users.chain(photos).chain(posts).collect()
    }
}

#[async_trait]
impl NodeFetcher for TestStore {
    type Record = Record;

    async fn fetch(
        &self,
        type_name: &str,
        id: &str,
        _ctx: &Context<'_>,
    ) -> Result<Option<Record>> {
        Ok(self.get(type_name, id))
    }
}

#[async_trait]
impl TypeResolver<Record> for TestStore {
    async fn resolve_type(&self, record: &Record, _ctx: &Context<'_>) -> Option<String> {
        Some(record.type_name().to_string())
    }
}
