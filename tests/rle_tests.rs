use std::time::Duration;

use sparselife::cell::Cell;
use sparselife::cell_set::CellSet;
use sparselife::pattern::Pattern;
use sparselife::rule_set::B3S23;
use sparselife::world::World;

const TICK: Duration = Duration::from_millis(50);

fn load(name: &str) -> anyhow::Result<Pattern> {
    Ok(Pattern::load(format!("tests/rle_pats/{name}.rle"))?)
}

#[test]
fn test_patterns() -> anyhow::Result<()> {
    let pattern_dir = std::fs::read_dir("tests/rle_pats")?;
    let mut tested = 0;
    let mut failed = Vec::new();

    for entry in pattern_dir {
        let path = entry?.path();

        match Pattern::load(&path) {
            Ok(pattern) if pattern.is_empty() => failed.push((path, "no live cells".to_string())),
            Ok(_) => tested += 1,
            Err(e) => failed.push((path, e.to_string())),
        }
    }

    if !failed.is_empty() {
        for (path, err) in &failed {
            eprintln!("Failed to parse {:?}: {}", path, err);
        }

        panic!(
            "{}/{} patterns failed to parse",
            failed.len(),
            tested + failed.len()
        );
    }

    assert!(tested > 0, "no patterns found");

    Ok(())
}

#[test]
fn metadata() -> anyhow::Result<()> {
    let pulsar = load("pulsar")?;
    assert_eq!(pulsar.name.as_deref(), Some("Pulsar"));
    assert_eq!(pulsar.rule, Some(B3S23));
    assert_eq!(pulsar.len(), 48);

    // no #N line, so the file name is used
    let lwss = load("lwss_nameless_rule")?;
    assert_eq!(lwss.name.as_deref(), Some("lwss_nameless_rule"));
    assert_eq!(lwss.rule, Some(B3S23));

    Ok(())
}

#[test]
fn pulsar_has_period_three() -> anyhow::Result<()> {
    let pulsar = load("pulsar")?;
    let start: CellSet = pulsar.centered().collect();

    let mut world = World::new();
    world.seed_pattern(&pulsar);

    world.advance(TICK);
    assert_ne!(world.cells(), &start);

    world.advance_n(2, TICK);
    assert_eq!(world.cells(), &start);

    Ok(())
}

#[test]
fn lwss_travels_two_cells_every_four_generations() -> anyhow::Result<()> {
    let lwss = load("lwss_nameless_rule")?;

    let mut world = World::new();
    world.seed(lwss.cells.iter().copied());
    world.advance_n(4, TICK);

    let moved: CellSet = lwss.cells.iter().map(|c| c.offset(-2, 0)).collect();
    assert_eq!(world.cells(), &moved);

    Ok(())
}

#[test]
fn gun_emits_a_glider_every_thirty_generations() -> anyhow::Result<()> {
    let gun = load("gosper_glider_gun")?;
    assert_eq!(gun, Pattern {
        name: Some("Gosper glider gun".to_string()),
        rule: Some(B3S23),
        ..Pattern::builtin("gosper-glider-gun")?
    });

    let mut world = World::new();
    world.seed_pattern(&gun);
    assert_eq!(world.population(), 36);

    world.advance_n(30, TICK);
    assert_eq!(world.population(), 41);

    world.advance_n(30, TICK);
    assert_eq!(world.population(), 46);
    assert!(world.cells().iter().all(|c: Cell| c.distance(Cell::ORIGIN) < 64));

    Ok(())
}
