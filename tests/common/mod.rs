#![allow(dead_code)]

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};

use async_trait::async_trait;
use chrono::NaiveDate;
use leads_backend::{
    models::lead::Lead,
    sheets::{grid::leads_from_grid, LeadSource, SheetsError},
};

pub fn row(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|c| c.to_string()).collect()
}

pub fn header() -> Vec<String> {
    row(&["Nome", "Telefone", "Endereço", "Horário", "Categoria", "Nota", "Avaliações", "Site", "Tem Site", "Termo"])
}

pub fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
}

/// Fonte em memória: devolve a grade atual ou falha quando `failing` está ligado.
#[derive(Default)]
pub struct FakeSource {
    pub grid: Mutex<Vec<Vec<String>>>,
    pub failing: Mutex<bool>,
    pub calls: AtomicUsize,
}

impl FakeSource {
    pub fn with_grid(grid: Vec<Vec<String>>) -> Arc<Self> {
        Arc::new(Self {
            grid: Mutex::new(grid),
            ..Default::default()
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            failing: Mutex::new(true),
            ..Default::default()
        })
    }

    pub fn set_grid(&self, grid: Vec<Vec<String>>) {
        *self.grid.lock().unwrap() = grid;
    }

    pub fn set_failing(&self, failing: bool) {
        *self.failing.lock().unwrap() = failing;
    }
}

#[async_trait]
impl LeadSource for FakeSource {
    async fn fetch_leads(&self) -> Result<Vec<Lead>, SheetsError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if *self.failing.lock().unwrap() {
            return Err(SheetsError::Api {
                status: 503,
                message: "backend unavailable".into(),
            });
        }
        let grid = self.grid.lock().unwrap().clone();
        Ok(leads_from_grid(&grid, day()))
    }
}
