// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Model assembly - runs the section parsers in dependency order
//!
//! Stage order is fixed: metadata, materials, section properties,
//! diaphragms, layout and points, connectivity, assignments, loads and
//! finally placed elements. Load sets are linked to the stories and floor
//! types of the area assignments that use them. Every stage reads the finished output of the
//! stages before it through read-only name tables.

use crate::context::ParseContext;
use crate::import::{self, AreaAssignRefs, LineAssignRefs};
use crate::scanner::SectionMap;
use crate::sections::*;
use e2k_lite_model::{ParseOutcome, Result, StageContext, StructuralModel};
use indexmap::IndexMap;

/// Drives one import over a split document
pub struct ModelAssembler<'a> {
    sections: &'a SectionMap,
    ctx: ParseContext,
    build_elements: bool,
}

impl<'a> ModelAssembler<'a> {
    pub fn new(sections: &'a SectionMap, case_insensitive: bool, build_elements: bool) -> Self {
        Self {
            sections,
            ctx: ParseContext::new(case_insensitive),
            build_elements,
        }
    }

    /// Section body, empty when the document lacks the section
    fn body(&self, name: &str) -> &'a str {
        self.sections.get(name).map(String::as_str).unwrap_or("")
    }

    /// Run one stage, wrapping its error with the stage name and warning
    /// about any references it left unresolved
    fn stage<T>(
        &mut self,
        stage: &'static str,
        run: impl FnOnce(&mut ParseContext) -> Result<T>,
    ) -> Result<T> {
        let unresolved_before = self.ctx.diagnostics.unresolved.len();
        let output = run(&mut self.ctx).stage(stage)?;

        let unresolved = self.ctx.diagnostics.unresolved.len() - unresolved_before;
        if unresolved > 0 {
            log::warn!("{stage}: {unresolved} unresolved references");
        }
        Ok(output)
    }

    /// Run every stage and return the model with its diagnostics
    pub fn assemble(mut self) -> Result<ParseOutcome> {
        let mut model = StructuralModel::new();

        let (program_info, controls) = (self.body(PROGRAM_INFORMATION), self.body(CONTROLS));
        model.metadata = self.stage("metadata", |ctx| import::parse_metadata(program_info, controls, ctx))?;

        // Materials
        let body = self.body(MATERIAL_PROPERTIES);
        let materials = self.stage("materials", |ctx| import::parse_materials(body, ctx))?;
        log::debug!("materials: {}", materials.len());
        let material_index = self.ctx.index(&materials, |m| m.id);

        // Section properties
        let body = self.body(FRAME_SECTIONS);
        let frames = self.stage("frame sections", |ctx| {
            import::parse_frame_sections(body, &materials, &material_index, ctx)
        })?;

        let (slabs, decks) = (self.body(SLAB_PROPERTIES), self.body(DECK_PROPERTIES));
        let floors = self.stage("floor properties", |ctx| {
            let mut floors = IndexMap::new();
            import::parse_slab_properties(slabs, &material_index, &mut floors, ctx)?;
            import::parse_deck_properties(decks, &material_index, &mut floors, ctx)?;
            Ok(floors)
        })?;

        let body = self.body(WALL_PROPERTIES);
        let walls = self.stage("wall properties", |ctx| {
            import::parse_wall_properties(body, &material_index, ctx)
        })?;
        log::debug!(
            "sections: {} frame, {} floor, {} wall",
            frames.len(),
            floors.len(),
            walls.len()
        );

        let body = self.body(DIAPHRAGM_NAMES);
        let diaphragms = self.stage("diaphragms", |ctx| import::parse_diaphragms(body, ctx))?;

        model.properties.materials = materials;
        model.properties.frame_properties = frames;
        model.properties.floor_properties = floors;
        model.properties.wall_properties = walls;
        model.properties.diaphragms = diaphragms;

        // Layout and points
        let body = self.body(STORIES);
        let (levels, floor_types) = self.stage("stories", |ctx| import::parse_stories(body, ctx))?;
        let body = self.body(GRIDS);
        let grids = self.stage("grids", |ctx| import::parse_grids(body, ctx))?;
        let body = self.body(POINT_COORDINATES);
        let points = self.stage("points", |ctx| import::parse_points(body, ctx))?;
        log::debug!(
            "layout: {} stories, {} floor types, {} grids, {} points",
            levels.len(),
            floor_types.len(),
            grids.len(),
            points.len()
        );

        model.layout.levels = levels;
        model.layout.floor_types = floor_types;
        model.layout.grids = grids;
        model.topology.points = points;

        // Connectivity
        let point_index = self.ctx.index(&model.topology.points, |p| p.id);
        let body = self.body(LINE_CONNECTIVITIES);
        model.topology.lines = self.stage("line connectivity", |ctx| {
            import::parse_line_connectivities(body, &point_index, ctx)
        })?;
        let body = self.body(AREA_CONNECTIVITIES);
        model.topology.areas = self.stage("area connectivity", |ctx| {
            import::parse_area_connectivities(body, &point_index, ctx)
        })?;
        log::debug!(
            "connectivity: {} lines, {} areas",
            model.topology.lines.len(),
            model.topology.areas.len()
        );

        // Assignments
        let story_index = self.ctx.index(&model.layout.levels, |l| l.id);
        let line_index = self.ctx.index(&model.topology.lines, |l| l.id);
        let frame_index = self.ctx.index(&model.properties.frame_properties, |f| f.id);
        let body = self.body(LINE_ASSIGNS);
        let line_refs = LineAssignRefs {
            lines: &line_index,
            stories: &story_index,
            frame_sections: &frame_index,
        };
        let line_assignments = self.stage("line assignments", |ctx| {
            import::parse_line_assigns(body, &line_refs, ctx)
        })?;

        let area_index = self.ctx.index(&model.topology.areas, |a| a.id);
        let floor_index = self.ctx.index(&model.properties.floor_properties, |f| f.id);
        let wall_index = self.ctx.index(&model.properties.wall_properties, |w| w.id);
        let diaphragm_index = self.ctx.index(&model.properties.diaphragms, |d| d.id);
        let body = self.body(AREA_ASSIGNS);
        let area_refs = AreaAssignRefs {
            areas: &model.topology.areas,
            area_index: &area_index,
            stories: &story_index,
            floor_properties: &floor_index,
            wall_properties: &wall_index,
            diaphragms: &diaphragm_index,
        };
        let area_assignments = self.stage("area assignments", |ctx| {
            import::parse_area_assigns(body, &area_refs, ctx)
        })?;
        log::debug!(
            "assignments: {} line, {} area",
            line_assignments.len(),
            area_assignments.len()
        );
        model.topology.line_assignments = line_assignments;
        model.topology.area_assignments = area_assignments;

        // Loads
        let body = self.body(LOAD_PATTERNS);
        model.loads.definitions = self.stage("load patterns", |ctx| import::parse_load_patterns(body, ctx))?;
        let pattern_index = self.ctx.index(&model.loads.definitions, |p| p.id);
        let body = self.body(LOAD_COMBINATIONS);
        model.loads.combinations = self.stage("load combinations", |ctx| {
            import::parse_load_combinations(body, &pattern_index, ctx)
        })?;
        let body = self.body(SHELL_UNIFORM_LOAD_SETS);
        model.loads.surface_loads = self.stage("load sets", |ctx| {
            import::parse_shell_uniform_load_sets(body, &pattern_index, ctx)
        })?;
        import::link_load_sets(
            &mut model.loads.surface_loads,
            &model.topology.area_assignments,
            &model.layout.levels,
            &self.ctx,
        );
        log::debug!(
            "loads: {} patterns, {} combinations, {} load sets",
            model.loads.definitions.len(),
            model.loads.combinations.len(),
            model.loads.surface_loads.len()
        );

        // Elements
        if self.build_elements {
            let elements = self.stage("elements", |ctx| {
                import::build_elements(&model.layout, &model.properties, &model.topology, &model.loads, ctx)
            })?;
            log::debug!(
                "elements: {} members, {} joints",
                elements.member_count(),
                elements.joints.len()
            );
            model.elements = elements;
        }

        let diagnostics = self.ctx.into_diagnostics();
        if !diagnostics.is_clean() {
            log::debug!(
                "import finished with {} skipped lines and {} unresolved references",
                diagnostics.skipped.len(),
                diagnostics.unresolved.len()
            );
        }

        Ok(ParseOutcome { model, diagnostics })
    }
}
