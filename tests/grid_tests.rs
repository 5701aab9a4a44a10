use std::path::PathBuf;

use torus_life::BoardState;
use torus_life::Grid;
use torus_life::GridError;
use torus_life::state::StateError;

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("torus_life_{}_{name}.json", std::process::id()))
}

#[test]
fn hive_pattern_is_still() -> anyhow::Result<()> {
    let mut grid = Grid::load("patterns/hive.json")?;
    let start = grid.clone();

    assert_eq!(grid.population(), 6);

    for _ in 0..10 {
        grid.advance();
        assert_eq!(grid, start);
    }

    Ok(())
}

#[test]
fn glider_circles_the_torus() -> anyhow::Result<()> {
    let mut grid = Grid::load("patterns/glider.json")?;
    let start = grid.clone();

    // A glider moves one cell diagonally every 4 generations, so on a 10x10 torus it is back
    // where it started after 40.
    for i in 1..=40 {
        grid.advance();
        assert_eq!(grid.population(), 5, "generation {i}");

        if i % 4 == 0 && i < 40 {
            assert_ne!(grid, start, "generation {i}");
        }
    }

    assert_eq!(grid, start);

    Ok(())
}

#[test]
fn save_then_load() -> anyhow::Result<()> {
    let path = temp_path("save_then_load");

    let mut grid = Grid::seeded(17, 9, 0.35, 2024)?;
    grid.advance();
    grid.save(&path)?;

    let loaded = Grid::load(&path)?;
    std::fs::remove_file(&path)?;

    assert_eq!(loaded, grid);

    Ok(())
}

#[test]
fn saved_file_uses_cellstext() -> anyhow::Result<()> {
    let path = temp_path("saved_file_uses_cellstext");

    let mut grid = Grid::seeded(3, 2, 0.0, 0)?;
    grid.set(1, 1, true);
    grid.save(&path)?;

    let json = std::fs::read_to_string(&path)?;
    std::fs::remove_file(&path)?;

    let state = BoardState::from_json(&json)?;
    assert_eq!(state, BoardState::new(3, 2, vec!["   ".into(), " * ".into()]));

    let value: serde_json::Value = serde_json::from_str(&json)?;
    assert_eq!(value["width"], 3);
    assert_eq!(value["height"], 2);
    assert_eq!(value["cellstext"][1], " * ");

    Ok(())
}

#[test]
fn malformed_file() -> anyhow::Result<()> {
    let path = temp_path("malformed_file");

    std::fs::write(&path, r#"{"width":4,"height":2,"cellstext":["****","***"]}"#)?;
    let err = Grid::load(&path).unwrap_err();
    assert!(matches!(
        err,
        GridError::MalformedState(StateError::RowLength { row: 1, .. })
    ));

    std::fs::write(&path, "not json")?;
    let err = Grid::load(&path).unwrap_err();
    assert!(matches!(
        err,
        GridError::MalformedState(StateError::Parse(_))
    ));

    std::fs::remove_file(&path)?;

    Ok(())
}

#[test]
fn missing_file() {
    let err = Grid::load(temp_path("does_not_exist")).unwrap_err();
    assert!(matches!(err, GridError::Io(_)));
}
