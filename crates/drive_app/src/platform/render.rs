use drive_core::{AppViewModel, UploadStatus};

const BAR_WIDTH: usize = 10;

/// Prints the view model as a plain-text tray and selection summary.
pub(crate) fn render(view: &AppViewModel) {
    println!(
        "uploads: {} total, {} active",
        view.upload_count, view.active_upload_count
    );
    for row in &view.uploads {
        let status = match row.status {
            UploadStatus::Uploading => format!("{} {:>3}%", progress_bar(row.progress), row.progress),
            UploadStatus::Completed => "done".to_string(),
            UploadStatus::Error => format!(
                "error: {}",
                row.error.as_deref().unwrap_or("unknown failure")
            ),
        };
        println!("  [{}] {:<24} {}", row.upload_id, row.file_name, status);
    }

    if view.selection_count == 0 {
        println!("selection: none");
    } else {
        println!(
            "selection ({}): {}",
            view.selection_count,
            view.selected.join(", ")
        );
    }
    if let Some(rect) = view.marquee {
        println!(
            "marquee: ({}, {}) .. ({}, {})",
            rect.min.x, rect.min.y, rect.max.x, rect.max.y
        );
    }
}

fn progress_bar(percent: u8) -> String {
    let filled = (usize::from(percent) * BAR_WIDTH) / 100;
    let mut bar = String::with_capacity(BAR_WIDTH + 2);
    bar.push('[');
    for slot in 0..BAR_WIDTH {
        bar.push(if slot < filled { '#' } else { '-' });
    }
    bar.push(']');
    bar
}
