//! Dashboard demo: builds a small settings panel, feeds it scripted input,
//! and prints every frame's command stream.
//!
//! Run with `RUST_LOG=loom_ui=debug cargo run --example dashboard` to see
//! rejections and resolver activity; set `LOOM_TRACE_LAYOUT=1` for per-node
//! layout traces.

use std::cell::Cell;
use std::rc::Rc;

use loom_ui::event::keys;
use loom_ui::style::{button_style, container_style, text_style};
use loom_ui::widgets::{Button, Canvas, Checkbox, Container, Dropdown, Input, Spacer, Text};
use loom_ui::{
    Align, Backend, Color, Direction, DrawCommand, EngineConfig, InputRecord, NodeData, Point,
    Property, Screen, SelectorGroup, Size, StyleRule, TraceFlags,
};
use tracing_subscriber::EnvFilter;

/// Prints commands to stdout.
struct PrintBackend {
    frame: usize,
}

impl Backend for PrintBackend {
    fn begin_frame(&mut self, size: Size) {
        self.frame += 1;
        println!("-- frame {} ({}x{})", self.frame, size.width, size.height);
    }

    fn execute(&mut self, commands: &[DrawCommand]) {
        for command in commands {
            println!("{command}");
        }
    }
}

fn main() -> loom_ui::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = EngineConfig::desktop()
        .with_surface(320.0, 240.0)
        .with_trace(TraceFlags::from_env());
    let mut screen = Screen::new(config);

    let clicks = Rc::new(Cell::new(0u32));
    let click_count = Rc::clone(&clicks);
    let frames = Rc::new(Cell::new(0u32));
    let frame_count = Rc::clone(&frames);

    let dom = screen.dom_mut();
    let root = dom.create(NodeData::new(Container::named("dashboard")).with_class("panel").with_gap(6.0))?;
    let title = dom.create(NodeData::new(Text::new("Settings").bold(true)).with_class("title"))?;
    let name = dom.create(NodeData::new(Input::new().with_placeholder("name")))?;
    let theme = dom.create(NodeData::new(
        Dropdown::new(["light", "dark", "system"]).with_placeholder("theme"),
    ))?;
    let notify = dom.create(NodeData::new(Checkbox::new("notifications")))?;
    let meter = dom.create(NodeData::new(
        Canvas::sized(120.0, 24.0)
            .on_draw(move |cx, sink| {
                let b = cx.content();
                let level = (frame_count.get() % 10) as f32 / 10.0;
                sink.fill_rect(
                    loom_ui::Region::new(b.x, b.y, b.width * level, b.height),
                    Color::rgb(0, 160, 80),
                );
                sink.line(
                    Point::new(b.x, b.bottom()),
                    Point::new(b.right(), b.bottom()),
                    Color::WHITE,
                    1.0,
                );
            })
            .on_update({
                let frames = Rc::clone(&frames);
                move |_, _| frames.set(frames.get() + 1)
            }),
    ))?;

    let actions = dom.create(NodeData::new(Container::named("actions")).with_direction(Direction::Row).with_gap(4.0))?;
    let cancel = dom.create(NodeData::new(Button::new("Cancel")).with_class("secondary"))?;
    let fill = dom.create(NodeData::new(Spacer::new()))?;
    let save = dom.create(NodeData::new(
        Button::new("Save").on_click(move || click_count.set(click_count.get() + 1)),
    ).with_class("primary"))?;

    for child in [title, name, theme, notify, meter, actions] {
        dom.attach(root, child)?;
    }
    for child in [cancel, fill, save] {
        dom.attach(actions, child)?;
    }
    dom.set_alignment(actions, Align::End, Align::Center);

    let styles = screen.styles_mut();
    styles.add_rule(container_style("panel", Color::rgb(24, 24, 32), 0.0, 12.0))?;
    styles.add_rule(text_style("title", Color::rgb(240, 240, 240)))?;
    styles.add_rule(button_style("primary", Color::rgb(0, 110, 200), Color::WHITE, 8.0, 80.0, 28.0))?;
    styles.add_rule(button_style("secondary", Color::rgb(70, 70, 80), Color::WHITE, 8.0, 80.0, 28.0))?;
    styles.add_rule(
        StyleRule::new(SelectorGroup::of_type("button").and_pseudo("hover"))
            .with(Property::BorderColor(Color::WHITE))
            .with(Property::BorderWidth(1.0)),
    )?;

    let mut backend = PrintBackend { frame: 0 };
    screen.present(&mut backend);

    // Type a name.
    if let Some(b) = screen.dom().absolute_bounds(name) {
        screen.handle_input(&InputRecord::release(b.x + 4.0, b.y + 4.0));
    }
    for c in "ada".chars() {
        screen.handle_input(&InputRecord::key_press(c as u32));
    }
    screen.handle_input(&InputRecord::key_press(keys::TAB));

    // Pick a theme: open, then choose the second option.
    if let Some(b) = screen.dom().absolute_bounds(theme) {
        screen.handle_input(&InputRecord::release(b.x + 4.0, b.y + 4.0));
        screen.handle_input(&InputRecord::release(b.x + 4.0, b.y + b.height * 2.5));
    }

    // Toggle notifications and press Save.
    for id in [notify, save] {
        if let Some(b) = screen.dom().absolute_bounds(id) {
            screen.handle_input(&InputRecord::hover(b.x + 2.0, b.y + 2.0, true));
            screen.handle_input(&InputRecord::press(b.x + 2.0, b.y + 2.0));
            screen.handle_input(&InputRecord::release(b.x + 2.0, b.y + 2.0));
        }
    }
    screen.tick(16);
    screen.present(&mut backend);

    let theme_name = screen
        .dom()
        .widget(theme)
        .and_then(|w| w.as_dropdown())
        .and_then(|d| d.selected_text())
        .unwrap_or("none")
        .to_owned();
    let notifications = screen
        .dom()
        .widget(notify)
        .and_then(|w| w.as_checkbox())
        .is_some_and(|c| c.is_checked());
    println!(
        "theme={theme_name} notifications={notifications} saves={} canvas_updates={}",
        clicks.get(),
        frames.get()
    );
    Ok(())
}
