use std::env;

use dom::{Document, NodeId, PointerKind};
use tracing::info;
use tracing_subscriber::EnvFilter;
use widgets::assets::BaseUrlResolver;
use widgets::{NavigationHelpButton, NavigationHelpOptions};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    if let Err(e) = real_main() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn real_main() -> Result<(), String> {
    let mut args: Vec<String> = env::args().collect();
    args.remove(0);

    let mut base_url = "Assets".to_string();
    let mut cmd = "demo".to_string();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--base-url" => {
                i += 1;
                if i >= args.len() {
                    return Err("--base-url requires a value".to_string());
                }
                base_url = args[i].clone();
            }
            s if s.starts_with('-') => {
                return Err(format!("unknown arg: {s}\n\n{}", usage()));
            }
            s => {
                cmd = s.to_string();
            }
        }
        i += 1;
    }

    match cmd.as_str() {
        "demo" => cmd_demo(&base_url),
        "snapshot" => cmd_snapshot(&base_url),
        _ => Err(usage()),
    }
}

fn usage() -> String {
    "usage: navhelp [--base-url URL] [demo|snapshot]\n\
     \n\
     demo       walk the widget through a toggle/close/destroy cycle,\n\
     \x20          printing the tree at each step\n\
     snapshot   print the freshly constructed widget tree as JSON"
        .to_string()
}

fn build_widget(base_url: &str) -> Result<(Document, NodeId, NavigationHelpButton), String> {
    let doc = Document::new();
    let host = doc.create_element("div");
    doc.set_attribute(host, "id", "toolbar");

    let widget = NavigationHelpButton::new(
        &doc,
        NavigationHelpOptions::new("toolbar"),
        &BaseUrlResolver::new(base_url),
    )
    .map_err(|e| e.to_string())?;
    Ok((doc, host, widget))
}

fn print_tree(doc: &Document, node: NodeId, label: &str) -> Result<(), String> {
    let json = serde_json::to_string_pretty(&doc.snapshot(node))
        .map_err(|e| format!("serialize snapshot: {e}"))?;
    println!("--- {label}\n{json}");
    Ok(())
}

fn cmd_snapshot(base_url: &str) -> Result<(), String> {
    let (doc, _host, widget) = build_widget(base_url)?;
    print_tree(&doc, widget.wrapper(), "widget")
}

fn cmd_demo(base_url: &str) -> Result<(), String> {
    let (doc, host, mut widget) = build_widget(base_url)?;
    let button = doc.children(widget.wrapper())[0];
    let outside = doc.create_element("div");

    print_tree(&doc, widget.wrapper(), "constructed (panel hidden)")?;

    info!("clicking the toolbar button");
    doc.dispatch_pointer_down(button, PointerKind::Mouse);
    doc.dispatch_click(button);
    println!(
        "show_instructions after click: {}",
        widget.view_model().show_instructions.get()
    );
    print_tree(&doc, widget.wrapper(), "after button click (panel visible)")?;

    info!("pointer-down outside the widget");
    doc.dispatch_pointer_down(outside, PointerKind::Mouse);
    println!(
        "show_instructions after outside pointer-down: {}",
        widget.view_model().show_instructions.get()
    );

    widget.destroy().map_err(|e| e.to_string())?;
    println!(
        "destroyed; host children: {}, document pointer listeners: {}",
        doc.child_count(host),
        doc.pointer_listener_count()
    );
    Ok(())
}
