//! Example: Painting an element tree built in code
//!
//! This example builds a small ethanol-like skeleton directly from element
//! types, without a scene file, and prints the canvas script and HTML page.

use easel::{
    ScriptBuilder,
    color::Color,
    config::{AppConfig, CanvasConfig},
    element::{ElementGroup, LineElement, RenderingElement, SymbolElement},
    model::{RendererModel, SCALE},
    text::FontDescriptor,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Building element tree...\n");

    let carbon = Color::rgb(144, 144, 144);
    let oxygen = Color::new("#ff0d0d")?;

    let bonds: ElementGroup = [
        LineElement::new(0.0, 0.0, 1.3, 0.75, 0.08),
        LineElement::new(1.3, 0.75, 2.6, 0.0, 0.08),
    ]
    .into_iter()
    .map(RenderingElement::from)
    .collect();

    let atoms = ElementGroup::new()
        .with_child(SymbolElement::new("C", 0.0, 0.0, carbon))
        .with_child(SymbolElement::new("C", 1.3, 0.75, carbon))
        .with_child(SymbolElement::new("OH", 2.6, 0.0, oxygen));

    // Bonds first so atom labels erase the bond ends behind them
    let molecule: RenderingElement = ElementGroup::new()
        .with_child(bonds)
        .with_child(atoms)
        .into();

    let config = AppConfig::new(
        CanvasConfig::default().with_size(320, 200).with_flip_y(true),
        FontDescriptor::new("Helvetica", 14),
        RendererModel::empty().with_parameter(SCALE, 0.5),
    );
    let builder = ScriptBuilder::new(config).with_strict(true);

    let script = builder.render_script(&molecule)?;
    println!("Canvas script:\n{script}");

    let page = builder.render_html(&molecule)?;
    println!("HTML page ({} bytes):\n{page}", page.len());

    Ok(())
}
