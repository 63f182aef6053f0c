use crate::{shared::StringItem, BASE_ATTRIBUTES};
use serde::{Deserialize, Serialize};

/// The `xl/commentsN.xml` part attached to a worksheet
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct Comments {
    #[serde(rename = "authors", default)]
    pub authors: Authors,
    #[serde(rename = "commentList", default)]
    pub comment_list: CommentList,
}
spreadsheet_part!(Comments, "comments", BASE_ATTRIBUTES);

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct Authors {
    #[serde(rename = "author", default)]
    pub items: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct CommentList {
    #[serde(rename = "comment", default)]
    pub items: Vec<Comment>,
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct Comment {
    #[serde(rename = "@ref")]
    pub reference: String,
    #[serde(rename = "@authorId")]
    pub author_id: u32,
    #[serde(rename = "text", default)]
    pub text: StringItem,
}

impl Comments {
    pub fn author(&self, comment: &Comment) -> Option<&str> {
        self.authors
            .items
            .get(comment.author_id as usize)
            .map(String::as_str)
    }
}
