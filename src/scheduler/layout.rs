//! Placement des jours de repos d'un employé.
//!
//! Le mois est parcouru jour par jour en choisissant travail ou repos. Une
//! table de faisabilité mémoïsée garantit qu'à chaque choix le reste du mois
//! peut encore être complété avec exactement `rest_days` jours de repos et des
//! blocs dans leurs bornes ; le nombre exact n'a donc jamais à être corrigé
//! après coup. Les préférences (jours réservés, week-ends travaillés, positions
//! cibles) ne font qu'orienter le parcours.
//!
//! Le premier et le dernier run du mois prolongent le mois voisin : seule leur
//! borne maximale s'applique.

use super::types::{BlockBounds, GeneratorConfig, Relaxation};
use std::collections::{BTreeSet, HashMap};

/// Règles d'un niveau de l'échelle de relâchement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Rules {
    pub work: BlockBounds,
    pub rest: BlockBounds,
    /// Les jours éligibles non réservés doivent être travaillés.
    pub keep_weekends: bool,
    pub honor_reserved: bool,
    pub relaxation: Option<Relaxation>,
}

/// Niveaux essayés dans l'ordre ; le dernier réussit toujours.
pub(super) fn ladder(config: &GeneratorConfig, days: u32) -> [Rules; 6] {
    let strict = Rules {
        work: config.work_block,
        rest: config.rest_block,
        keep_weekends: true,
        honor_reserved: true,
        relaxation: None,
    };
    let free_weekends = Rules {
        keep_weekends: false,
        ..strict
    };
    let single_rest = Rules {
        rest: BlockBounds::new(1, config.rest_block.max),
        relaxation: Some(Relaxation::SingleRestDay),
        ..free_weekends
    };
    let any_work = Rules {
        work: BlockBounds::new(1, days),
        relaxation: Some(Relaxation::WorkBlockLength),
        ..single_rest
    };
    let any_rest = Rules {
        rest: BlockBounds::new(1, days),
        relaxation: Some(Relaxation::RestBlockLength),
        ..any_work
    };
    let unreserved = Rules {
        honor_reserved: false,
        relaxation: Some(Relaxation::WeekendRest),
        ..any_rest
    };
    [strict, free_weekends, single_rest, any_work, any_rest, unreserved]
}

#[derive(Debug, Clone, Copy)]
pub(super) struct PlanRequest<'a> {
    pub days: u32,
    pub rest_days: u32,
    pub reserved: &'a BTreeSet<u32>,
    /// Jours éligibles au repos, triés.
    pub rest_eligible: &'a [u32],
    /// Décalage des positions cibles, pour désynchroniser les employés.
    pub offset: u32,
}

impl PlanRequest<'_> {
    fn is_eligible(&self, day: u32) -> bool {
        self.rest_eligible.binary_search(&day).is_ok()
    }

    /// Positions cibles des blocs de repos restant à placer.
    fn targets(&self) -> Vec<u32> {
        let remaining = self.rest_days.saturating_sub(self.reserved.len() as u32);
        let blocks = ((2 * remaining + 4) / 5).max(1);
        let segment = self.days / (blocks + 1);
        (1..=blocks).map(|b| segment * b + self.offset).collect()
    }
}

/// État après un jour : nature et longueur du run courant, repos consommés.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct State {
    rest: bool,
    len: u32,
    used: u32,
    /// Encore dans le premier run du mois.
    opening: bool,
}

struct Planner<'a> {
    request: &'a PlanRequest<'a>,
    rules: &'a Rules,
    memo: HashMap<(u32, State), bool>,
}

impl<'a> Planner<'a> {
    fn new(request: &'a PlanRequest<'a>, rules: &'a Rules) -> Self {
        Self {
            request,
            rules,
            memo: HashMap::new(),
        }
    }

    fn bounds(&self, rest: bool) -> BlockBounds {
        if rest {
            self.rules.rest
        } else {
            self.rules.work
        }
    }

    fn allowed(&self, day: u32, rest: bool) -> bool {
        let reserved = self.request.reserved.contains(&day);
        if rest {
            !(self.rules.keep_weekends && !reserved && self.request.is_eligible(day))
        } else {
            !(self.rules.honor_reserved && reserved)
        }
    }

    fn start(&self, rest: bool) -> Option<State> {
        if !self.allowed(1, rest) {
            return None;
        }
        Some(State {
            rest,
            len: 1,
            used: u32::from(rest),
            opening: true,
        })
    }

    fn step(&self, day: u32, state: State, rest: bool) -> Option<State> {
        if !self.allowed(day, rest) {
            return None;
        }
        let used = state.used + u32::from(rest);
        if used > self.request.rest_days {
            return None;
        }
        if rest == state.rest {
            if state.len + 1 > self.bounds(rest).max {
                return None;
            }
            return Some(State {
                len: state.len + 1,
                used,
                ..state
            });
        }
        if state.len < self.bounds(state.rest).min && !state.opening {
            return None;
        }
        Some(State {
            rest,
            len: 1,
            used,
            opening: false,
        })
    }

    /// Le mois peut-il être complété depuis `state`, atteint à la fin de `day` ?
    fn feasible(&mut self, day: u32, state: State) -> bool {
        if day == self.request.days {
            return state.used == self.request.rest_days;
        }
        if let Some(hit) = self.memo.get(&(day, state)) {
            return *hit;
        }
        let mut ok = false;
        for rest in [false, true] {
            if let Some(next) = self.step(day + 1, state, rest) {
                if self.feasible(day + 1, next) {
                    ok = true;
                    break;
                }
            }
        }
        self.memo.insert((day, state), ok);
        ok
    }

    /// Ordre d'essai : repos en premier seulement hors week-end, en fin de
    /// bloc de travail, une fois la position cible atteinte.
    fn preference(&self, day: u32, in_rest: bool, target: Option<u32>) -> [bool; 2] {
        if in_rest || self.request.is_eligible(day) {
            return [false, true];
        }
        match target {
            Some(t) if day >= t => [true, false],
            _ => [false, true],
        }
    }
}

/// Drapeaux « repos » par jour (jour 1 en tête), ou `None` si aucun placement
/// ne respecte `rules`.
pub(super) fn plan(request: &PlanRequest<'_>, rules: &Rules) -> Option<Vec<bool>> {
    let mut planner = Planner::new(request, rules);
    let targets = request.targets();
    let mut next_target = 0usize;

    let mut state = None;
    for rest in planner.preference(1, false, targets.first().copied()) {
        if let Some(first) = planner.start(rest) {
            if planner.feasible(1, first) {
                state = Some(first);
                break;
            }
        }
    }
    let mut state = state?;
    let mut out = Vec::with_capacity(request.days as usize);
    out.push(state.rest);

    for day in 2..=request.days {
        let target = targets.get(next_target).copied();
        let mut chosen = None;
        for rest in planner.preference(day, state.rest, target) {
            if let Some(next) = planner.step(day, state, rest) {
                if planner.feasible(day, next) {
                    chosen = Some(next);
                    break;
                }
            }
        }
        let next = chosen?;
        if next.rest && !state.rest && target.is_some_and(|t| day >= t) {
            next_target += 1;
        }
        state = next;
        out.push(next.rest);
    }
    Some(out)
}
