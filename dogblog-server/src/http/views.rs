//! Server-rendered pages
//!
//! Plain string assembly; every interpolated value goes through [`escape`].

use crate::models::{Account, Post};

/// Escape text for use in HTML bodies and double-quoted attributes.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, current: Option<&Account>, content: &str) -> String {
    let nav = match current {
        Some(account) => format!(
            r#"<span>Signed in as {}</span> <a href="/create">New post</a> <a href="/logout">Log out</a>"#,
            escape(account.display_name())
        ),
        None => r#"<a href="/signin">Sign in</a> <a href="/signup">Sign up</a>"#.to_string(),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title} | Dog Blog</title>
<link rel="stylesheet" href="/styles/main.css">
</head>
<body>
<header><a href="/">Dog Blog</a> <nav>{nav}</nav></header>
<main>
{content}
</main>
</body>
</html>
"#,
        title = escape(title),
    )
}

/// Home page: every post, newest first, with owner controls on the
/// current account's posts.
pub fn home(posts: &[Post], current: Option<&Account>) -> String {
    let mut content = String::from("<h1>Latest posts</h1>\n");

    if posts.is_empty() {
        content.push_str("<p>No posts yet.</p>\n");
    }

    for post in posts {
        content.push_str(&format!(
            r#"<article id="post-{id}">
<h2>{title}</h2>
<time datetime="{stamp}">{date}</time>
<p>{body}</p>
"#,
            id = post.blog_id,
            title = escape(&post.title),
            stamp = post.date_created.to_rfc3339(),
            date = post.date_created.format("%Y-%m-%d %H:%M"),
            body = escape(&post.body),
        ));

        if current.is_some_and(|account| post.is_owned_by(account.user_id)) {
            content.push_str(&format!(
                r#"<a href="/edit/{id}">Edit</a>
<form method="post" action="/delete-post/{id}"><button type="submit">Delete</button></form>
"#,
                id = post.blog_id,
            ));
        }

        content.push_str("</article>\n");
    }

    layout("Home", current, &content)
}

pub fn create_form(current: &Account) -> String {
    let content = r#"<h1>New post</h1>
<form method="post" action="/create">
<label>Title <input name="title"></label>
<label>Body <textarea name="body"></textarea></label>
<button type="submit">Publish</button>
</form>"#;
    layout("New post", Some(current), content)
}

pub fn edit_form(post: &Post, current: &Account) -> String {
    let content = format!(
        r#"<h1>Edit post</h1>
<form method="post" action="/edit/{id}">
<label>Title <input name="title" value="{title}"></label>
<label>Body <textarea name="body">{body}</textarea></label>
<button type="submit">Save</button>
</form>"#,
        id = post.blog_id,
        title = escape(&post.title),
        body = escape(&post.body),
    );
    layout("Edit post", Some(current), &content)
}

pub fn signup_form() -> String {
    let content = r#"<h1>Sign up</h1>
<form method="post" action="/signup">
<label>Username <input name="username"></label>
<label>Password <input name="password" type="password"></label>
<label>Name <input name="name"></label>
<button type="submit">Create account</button>
</form>"#;
    layout("Sign up", None, content)
}

pub fn signin_form() -> String {
    let content = r#"<h1>Sign in</h1>
<form method="post" action="/signin">
<label>Username <input name="username"></label>
<label>Password <input name="password" type="password"></label>
<button type="submit">Sign in</button>
</form>"#;
    layout("Sign in", None, content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn account(user_id: i32) -> Account {
        Account {
            user_id,
            username: format!("user{user_id}"),
            password: "pw".into(),
            name: Some(format!("User {user_id}")),
        }
    }

    fn post(blog_id: i32, owner: i32, title: &str) -> Post {
        Post {
            blog_id,
            title: title.into(),
            body: "body".into(),
            creator_user_id: owner,
            date_created: Utc::now(),
        }
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape(r#"<b>"Rex" & 'Fido'</b>"#),
            "&lt;b&gt;&quot;Rex&quot; &amp; &#39;Fido&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn home_shows_controls_only_for_owned_posts() {
        let posts = vec![post(1, 1, "Mine"), post(2, 2, "Theirs")];
        let html = home(&posts, Some(&account(1)));

        assert!(html.contains(r#"href="/edit/1""#));
        assert!(html.contains(r#"action="/delete-post/1""#));
        assert!(!html.contains(r#"href="/edit/2""#));
        assert!(html.contains("Signed in as User 1"));
    }

    #[test]
    fn anonymous_home_offers_sign_in() {
        let html = home(&[], None);
        assert!(html.contains(r#"href="/signin""#));
        assert!(html.contains("No posts yet."));
    }

    #[test]
    fn edit_form_is_prefilled_and_escaped() {
        let html = edit_form(&post(3, 1, "<Walk>"), &account(2));
        assert!(html.contains(r#"value="&lt;Walk&gt;""#));
        assert!(html.contains(r#"action="/edit/3""#));
    }
}
