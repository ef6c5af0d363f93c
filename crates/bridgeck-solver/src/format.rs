//! Type formatting for diagnostics and reports.

use crate::instantiate::Instantiation;
use crate::registry::TypeRegistry;
use crate::types::{Member, TypeData, TypeId};

pub struct TypeFormatter<'a> {
    registry: &'a TypeRegistry,
}

impl<'a> TypeFormatter<'a> {
    pub fn new(registry: &'a TypeRegistry) -> Self {
        TypeFormatter { registry }
    }

    pub fn format_type(&self, ty: TypeId) -> String {
        let mut out = String::new();
        self.write_type(&mut out, ty);
        out
    }

    fn write_type(&self, out: &mut String, ty: TypeId) {
        let types = self.registry.types();
        match types.lookup(ty) {
            Some(TypeData::Named { decl, args }) => {
                out.push_str(&self.registry.name_of(decl));
                let args = types.type_list(args);
                if !args.is_empty() {
                    out.push('<');
                    for (i, &arg) in args.iter().enumerate() {
                        if i > 0 {
                            out.push_str(", ");
                        }
                        self.write_type(out, arg);
                    }
                    out.push('>');
                }
            }
            Some(TypeData::Param { owner, index }) => {
                match self.registry.decl(owner).type_params.get(index as usize) {
                    Some(&name) => out.push_str(&types.resolve_name(name)),
                    None => out.push('?'),
                }
            }
            Some(TypeData::Var(name)) => out.push_str(&types.resolve_name(name)),
            None => out.push_str("<unknown>"),
        }
    }

    #[inline]
    pub fn format_instantiation(&self, inst: &Instantiation) -> String {
        self.format_type(inst.type_id)
    }

    /// `name(P1, P2): R`
    pub fn format_member(&self, member: &Member) -> String {
        let mut out = String::new();
        out.push_str(&self.registry.types().resolve_name(member.name));
        out.push('(');
        for (i, &param) in member.params.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            self.write_type(&mut out, param);
        }
        out.push_str("): ");
        self.write_type(&mut out, member.return_type);
        out
    }

    /// `Owner.name(P1, P2): R`
    pub fn format_qualified_member(&self, member: &Member) -> String {
        format!(
            "{}.{}",
            self.registry.name_of(member.owner),
            self.format_member(member)
        )
    }
}
