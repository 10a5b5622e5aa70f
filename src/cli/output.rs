//! CLI output formatting utilities

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};

use crate::client::PhotoViewState;
use crate::photos::Photo;
use crate::users::UserProfile;

/// Print a success message
pub fn success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Print an error message
pub fn error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

/// Print a warning message
pub fn warn(message: &str) {
    println!("{} {}", "⚠".yellow(), message);
}

/// Print an info message
pub fn info(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}

pub fn print_user(user: &UserProfile) {
    println!("{}", user.name.bold().underline());
    println!();
    println!("  {} {}", "Id:".bold(), user.id);
    println!("  {} {}", "E-mail:".bold(), user.email);
    if let Some(image) = &user.profile_image {
        println!("  {} {}", "Image:".bold(), image.cyan());
    }
    if let Some(bio) = &user.bio {
        println!("  {} {}", "Bio:".bold(), bio);
    }
    println!(
        "  {} {}",
        "Joined:".bold(),
        user.created_at.format("%Y-%m-%d %H:%M")
    );
}

/// Print a table of photos
pub fn print_photo_table(photos: &[Photo]) {
    if photos.is_empty() {
        info("No photos found. Post one with 'photogram photo post --title <title> --image <image>'");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Id").fg(Color::Cyan),
            Cell::new("Title").fg(Color::Cyan),
            Cell::new("By").fg(Color::Cyan),
            Cell::new("Likes").fg(Color::Cyan),
            Cell::new("Comments").fg(Color::Cyan),
            Cell::new("Posted").fg(Color::Cyan),
        ]);

    for photo in photos {
        table.add_row(vec![
            Cell::new(photo.id),
            Cell::new(&photo.title),
            Cell::new(&photo.user_name),
            Cell::new(photo.likes.len()).fg(Color::Magenta),
            Cell::new(photo.comments.len()),
            Cell::new(photo.created_at.format("%Y-%m-%d %H:%M").to_string()),
        ]);
    }

    println!("{table}");
}

/// Render the photo view in the terminal
pub fn print_photo_view(state: &PhotoViewState) {
    if state.loading {
        println!("Carregando...");
        return;
    }

    if let Some(photo) = &state.photo {
        println!("{}", photo.title.bold().underline());
        println!("  {} {}", "Image:".bold(), photo.image.cyan());
        println!("  {} {}", "By:".bold(), photo.user_name);
        println!("  {} {}", "♥".red(), photo.likes.len());
    }

    if let Some(message) = &state.error {
        error(message);
    }
    if let Some(message) = &state.message {
        success(message);
    }

    let Some(photo) = &state.photo else {
        return;
    };

    println!();
    println!("{}", format!("Comentários: ({})", photo.comments.len()).bold());
    if photo.comments.is_empty() {
        println!("  Não há comentários...");
    }
    for comment in &photo.comments {
        println!("  {} {}", format!("{}:", comment.user_name).bold(), comment.comment);
    }
}
