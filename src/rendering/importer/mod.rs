/// Importers convert already parsed files from track-files into the intermediate representation
/// (see [`crate::rendering::common::types`]), so consumers never deal with the file formats.
pub mod model_importer;
