//! blog list / show / create / update / publish / archive / delete / categories

use std::convert::Infallible;

use clap::{Args, Subcommand};

use temizyuva_client::Route;
use temizyuva_client::services::blog::DEFAULT_PAGE_SIZE;
use temizyuva_core::filter::{BlogFilter, ClientFilter};
use temizyuva_core::types::{BlogPost, BlogPostInput, BlogStatus, DEFAULT_CATEGORY};
use temizyuva_core::Page;

use super::Context;
use crate::output::{self, Table, truncate};

#[allow(clippy::unnecessary_wraps)]
fn blog_status(raw: &str) -> Result<BlogStatus, Infallible> {
    Ok(BlogStatus::parse(raw))
}

/// Blog commands
#[derive(Debug, Subcommand)]
pub enum BlogCommand {
    /// List one page of posts
    List {
        /// Page number, starting at 1
        #[arg(long, default_value_t = 1)]
        page: u32,

        /// Posts per page
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        page_size: u32,

        /// Title or description fragment
        #[arg(short, long)]
        search: Option<String>,

        /// Only posts in this status (draft, published, archived)
        #[arg(long, value_parser = blog_status)]
        status: Option<BlogStatus>,

        /// Only posts in this category
        #[arg(long)]
        category: Option<String>,
    },

    /// Show one post
    Show {
        /// Post ID
        id: i64,
    },

    /// Draft a new post
    Create {
        /// Title
        #[arg(long)]
        title: String,

        #[command(flatten)]
        fields: PostFields,
    },

    /// Edit a post; omitted fields keep their current value
    Update {
        /// Post ID
        id: i64,

        /// Title
        #[arg(long)]
        title: Option<String>,

        /// Status (draft, published, archived)
        #[arg(long, value_parser = blog_status)]
        status: Option<BlogStatus>,

        #[command(flatten)]
        fields: PostFields,
    },

    /// Put a post live
    Publish {
        /// Post ID
        id: i64,

        /// Keep the original publication date
        #[arg(long)]
        keep_date: bool,
    },

    /// Take a post off the site
    Archive {
        /// Post ID
        id: i64,
    },

    /// Remove a post
    Delete {
        /// Post ID
        id: i64,
    },

    /// List the categories used on one page of posts
    Categories {
        /// Page number, starting at 1
        #[arg(long, default_value_t = 1)]
        page: u32,

        /// Posts per page
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        page_size: u32,
    },
}

/// Optional post fields shared by create and update
#[derive(Debug, Args)]
pub struct PostFields {
    /// SEO description
    #[arg(long)]
    meta_description: Option<String>,

    /// HTML body, or @FILE to read it from a file
    #[arg(long)]
    content: Option<String>,

    /// Category
    #[arg(long)]
    category: Option<String>,

    /// Tag; repeat for several, replaces all tags on update
    #[arg(long = "tag")]
    tags: Vec<String>,

    /// Cover image URL
    #[arg(long)]
    cover_image: Option<String>,

    /// URL slug; derived from the title when empty
    #[arg(long)]
    slug: Option<String>,
}

impl PostFields {
    async fn apply(self, mut input: BlogPostInput) -> anyhow::Result<BlogPostInput> {
        if let Some(meta) = self.meta_description {
            input.meta_description = meta;
        }
        if let Some(content) = self.content {
            input.content = read_content(content).await?;
        }
        if let Some(category) = self.category {
            input.category = category;
        }
        if !self.tags.is_empty() {
            input.tags = self.tags;
        }
        if let Some(cover) = self.cover_image {
            input.cover_image = cover;
        }
        if let Some(slug) = self.slug {
            input.slug = slug;
        }
        Ok(input)
    }
}

async fn read_content(raw: String) -> anyhow::Result<String> {
    match raw.strip_prefix('@') {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to read post body from {path}: {e}")),
        None => Ok(raw),
    }
}

pub async fn run(ctx: &Context, command: BlogCommand) -> anyhow::Result<()> {
    ctx.enter(Route::Blog).await?;
    let blog = ctx.client.blog();

    match command {
        BlogCommand::List {
            page,
            page_size,
            search,
            status,
            category,
        } => {
            let mut page = blog.list(page, page_size).await?;
            let filter = BlogFilter {
                search,
                status,
                category,
            };
            page.items = filter.apply(&page.items);
            output::emit(ctx.output, &page, posts_table)
        }
        BlogCommand::Show { id } => {
            let post = blog.get(id).await?;
            output::emit(ctx.output, &post, post_table)
        }
        BlogCommand::Create { title, fields } => {
            let input = fields
                .apply(BlogPostInput {
                    title,
                    ..BlogPostInput::default()
                })
                .await?;
            match blog.create(input).await? {
                Some(post) => output::emit(ctx.output, &post, post_table),
                None => output::done(ctx.output, "Draft saved."),
            }
        }
        BlogCommand::Update {
            id,
            title,
            status,
            fields,
        } => {
            let current = BlogPostInput::from(&blog.get(id).await?);
            let mut input = fields.apply(current).await?;
            if let Some(title) = title {
                input.title = title;
            }
            if let Some(status) = status {
                input.status = status;
            }
            blog.update(id, input).await?;
            output::done(ctx.output, &format!("Post {id} updated."))
        }
        BlogCommand::Publish { id, keep_date } => {
            blog.publish(id, !keep_date).await?;
            output::done(ctx.output, &format!("Post {id} published."))
        }
        BlogCommand::Archive { id } => {
            blog.archive(id).await?;
            output::done(ctx.output, &format!("Post {id} archived."))
        }
        BlogCommand::Delete { id } => {
            blog.delete(id).await?;
            output::done(ctx.output, &format!("Post {id} deleted."))
        }
        BlogCommand::Categories { page, page_size } => {
            let categories = blog.categories(page, page_size).await?;
            output::emit(ctx.output, categories.as_slice(), |categories| {
                let mut table = Table::new(["CATEGORY"]);
                for category in categories {
                    table.push([category.as_str()]);
                }
                table
            })
        }
    }
}

fn posts_table(page: &Page<BlogPost>) -> Table {
    let mut table = Table::new(["ID", "TITLE", "CATEGORY", "STATUS", "PUBLISHED", "LIKES"]);
    for p in &page.items {
        table.push([
            p.id.to_string(),
            truncate(&p.title, 48),
            p.category.clone().unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            p.status.to_string(),
            p.published_at.map(output::date_time).unwrap_or_default(),
            p.like_count.unwrap_or_default().to_string(),
        ]);
    }
    table.with_footer(format!(
        "Page {}/{}, {} posts in total",
        page.current_page, page.total_pages, page.total_count
    ))
}

fn post_table(p: &BlogPost) -> Table {
    Table::fields([
        ("ID", p.id.to_string()),
        ("Title", p.title.clone()),
        ("Slug", p.slug.clone().unwrap_or_default()),
        ("Status", p.status.to_string()),
        ("Category", p.category.clone().unwrap_or_default()),
        ("Tags", p.tags.join(", ")),
        ("Author", p.author.clone().unwrap_or_default()),
        ("Created", output::date_time(p.created_at)),
        ("Published", p.published_at.map(output::date_time).unwrap_or_default()),
        ("Description", p.meta_description.clone().unwrap_or_default()),
    ])
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn fields() -> PostFields {
        PostFields {
            meta_description: None,
            content: None,
            category: None,
            tags: Vec::new(),
            cover_image: None,
            slug: None,
        }
    }

    #[tokio::test]
    async fn test_omitted_fields_keep_current_values() {
        let current = BlogPostInput {
            title: "Halı yıkama".to_string(),
            content: "<p>Eski</p>".to_string(),
            tags: vec!["halı".to_string()],
            ..BlogPostInput::default()
        };

        let updated = PostFields {
            category: Some("Ev".to_string()),
            ..fields()
        }
        .apply(current.clone())
        .await
        .unwrap();

        assert_eq!(updated.content, current.content);
        assert_eq!(updated.tags, current.tags);
        assert_eq!(updated.category, "Ev");
    }

    #[tokio::test]
    async fn test_content_from_file() {
        let path = std::env::temp_dir().join(format!("temizyuva-post-{}.html", std::process::id()));
        std::fs::write(&path, "<h1>Merhaba</h1>").unwrap();

        let content = read_content(format!("@{}", path.display())).await.unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(content, "<h1>Merhaba</h1>");
        assert_eq!(read_content("düz metin".to_string()).await.unwrap(), "düz metin");
        assert!(read_content("@/nonexistent/post.html".to_string()).await.is_err());
    }

    #[test]
    fn test_status_argument() {
        assert_eq!(blog_status("Published").unwrap(), BlogStatus::Published);
        assert_eq!(blog_status("scheduled").unwrap(), BlogStatus::Other("scheduled".to_string()));
    }
}
