use std::path::PathBuf;

use drive_core::{DisplayedItem, Msg, PickedFile, Point, Rect};
use drive_logging::drive_warn;

use super::app::ShellEvent;
use super::confirm::ConfirmGate;

const TILE_SIZE: i32 = 16;
const TILE_PITCH: i32 = 24;
const TILES_PER_ROW: i32 = 4;

const HELP: &str = "\
commands:
  upload <path>...         enqueue files for upload
  folder <id>...           display a folder with the given items
  click <id>               plain click (replace selection, activate)
  ctrl-click <id>          modified click (toggle selection)
  check <id>               per-item checkbox (toggle, no activation)
  open <id>                double-click open
  drag <x1> <y1> <x2> <y2>       marquee selection
  drag-add <x1> <y1> <x2> <y2>   additive marquee selection
  select <id>...           owner-side selection override
  delete                   delete the current selection (asks to confirm)
  dismiss <upload-id>      remove one upload tray entry
  clear-completed          remove finished tray entries
  status                   print the current view
  quit";

/// Turns one input line into shell events.
///
/// While a confirm request is pending, `y`/`n` answer it and any other
/// interaction dismisses it as declined before being handled normally.
pub(crate) fn parse_line(line: &str, folder_id: &str, confirm: &ConfirmGate) -> Vec<ShellEvent> {
    let line = line.trim();
    if line.is_empty() {
        return Vec::new();
    }

    let mut events = Vec::new();
    if let Some(token) = confirm.pending() {
        match line {
            "y" | "yes" => {
                confirm.take();
                return vec![ShellEvent::Core(Msg::ConfirmResolved {
                    token,
                    accepted: true,
                })];
            }
            "n" | "no" => {
                confirm.take();
                return vec![ShellEvent::Core(Msg::ConfirmResolved {
                    token,
                    accepted: false,
                })];
            }
            _ => {
                confirm.take();
                events.push(ShellEvent::Core(Msg::ConfirmResolved {
                    token,
                    accepted: false,
                }));
            }
        }
    }

    let mut parts = line.split_whitespace();
    let command = parts.next().unwrap_or_default();
    let args: Vec<&str> = parts.collect();

    match command {
        "help" => println!("{HELP}"),
        "upload" if !args.is_empty() => {
            let files = args
                .iter()
                .map(|arg| {
                    let path = PathBuf::from(arg);
                    let name = path
                        .file_name()
                        .map(|name| name.to_string_lossy().into_owned())
                        .unwrap_or_else(|| arg.to_string());
                    PickedFile { name, path }
                })
                .collect();
            events.push(ShellEvent::Core(Msg::FilesPicked {
                folder_id: folder_id.to_string(),
                files,
            }));
        }
        "folder" => {
            let items = args
                .iter()
                .enumerate()
                .map(|(index, id)| grid_tile(index as i32, id))
                .collect();
            events.push(ShellEvent::Core(Msg::CollectionChanged {
                items,
                selected: Vec::new(),
            }));
        }
        "click" if args.len() == 1 => events.push(ShellEvent::Core(Msg::ItemClicked {
            item_id: args[0].to_string(),
            modifier: false,
        })),
        "ctrl-click" if args.len() == 1 => events.push(ShellEvent::Core(Msg::ItemClicked {
            item_id: args[0].to_string(),
            modifier: true,
        })),
        "check" if args.len() == 1 => events.push(ShellEvent::Core(Msg::CheckboxToggled {
            item_id: args[0].to_string(),
        })),
        "open" if args.len() == 1 => events.push(ShellEvent::Core(Msg::ItemOpened {
            item_id: args[0].to_string(),
        })),
        "drag" | "drag-add" if args.len() == 4 => match parse_corners(&args) {
            Some((from, to)) => {
                events.push(ShellEvent::Core(Msg::MarqueePressed {
                    position: from,
                    additive: command == "drag-add",
                }));
                events.push(ShellEvent::Core(Msg::MarqueeMoved { position: to }));
                events.push(ShellEvent::Core(Msg::MarqueeReleased));
            }
            None => drive_warn!("drag needs four integer coordinates"),
        },
        "select" => events.push(ShellEvent::Core(Msg::SelectionSynced {
            selected: args.iter().map(|id| id.to_string()).collect(),
        })),
        "delete" => events.push(ShellEvent::Core(Msg::DeleteSelectionRequested)),
        "dismiss" if args.len() == 1 => match args[0].parse() {
            Ok(upload_id) => events.push(ShellEvent::Core(Msg::DismissUpload { upload_id })),
            Err(_) => drive_warn!("dismiss needs a numeric upload id"),
        },
        "clear-completed" => events.push(ShellEvent::Core(Msg::ClearCompletedClicked)),
        "status" => events.push(ShellEvent::ShowStatus),
        "quit" | "exit" => events.push(ShellEvent::Quit),
        other => drive_warn!("unknown command: {}", other),
    }

    events
}

/// Lays folder items out in a fixed grid so marquee coordinates mean the
/// same thing on every run.
fn grid_tile(index: i32, item_id: &str) -> DisplayedItem {
    let x = (index % TILES_PER_ROW) * TILE_PITCH;
    let y = (index / TILES_PER_ROW) * TILE_PITCH;
    DisplayedItem {
        item_id: item_id.to_string(),
        bounds: Rect::from_corners(
            Point { x, y },
            Point {
                x: x + TILE_SIZE,
                y: y + TILE_SIZE,
            },
        ),
    }
}

fn parse_corners(args: &[&str]) -> Option<(Point, Point)> {
    let coords: Vec<i32> = args.iter().filter_map(|arg| arg.parse().ok()).collect();
    match coords.as_slice() {
        [x1, y1, x2, y2] => Some((Point { x: *x1, y: *y1 }, Point { x: *x2, y: *y2 })),
        _ => None,
    }
}
