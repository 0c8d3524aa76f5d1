use rand::{Rng, RngCore};

/// Source de hasard injectable pour le tirage des créneaux.
pub trait SlotSource {
    /// Indice uniforme dans `0..len`. `len` est toujours > 0.
    fn pick(&mut self, len: usize) -> usize;
}

impl<R: RngCore> SlotSource for R {
    fn pick(&mut self, len: usize) -> usize {
        self.gen_range(0..len)
    }
}

/// Rejoue une suite d'indices fixée (modulo `len`), en boucle.
///
/// Utile pour obtenir un placement exact en test.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    script: Vec<usize>,
    cursor: usize,
}

impl ScriptedSource {
    pub fn new(script: Vec<usize>) -> Self {
        Self { script, cursor: 0 }
    }

    /// Nombre de tirages déjà consommés.
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl SlotSource for ScriptedSource {
    fn pick(&mut self, len: usize) -> usize {
        if self.script.is_empty() {
            self.cursor += 1;
            return 0;
        }
        let raw = self.script[self.cursor % self.script.len()];
        self.cursor += 1;
        raw % len
    }
}
